//! Product copywriting on top of a [`TextGenerator`].

use std::sync::Arc;

use crate::client::TextGenerator;
use crate::result::{AiError, AiResult};

/// Number of name candidates requested per call.
pub const NAME_CANDIDATES: usize = 5;

/// Generates product names and descriptions for marketplace listings.
///
/// Built without a generator when no API key is configured; every call then
/// fails with [`AiError::NotConfigured`].
#[derive(Clone)]
pub struct ProductCopywriter {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl ProductCopywriter {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    pub fn disabled() -> Self {
        Self { generator: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    fn generator(&self) -> AiResult<&dyn TextGenerator> {
        self.generator.as_deref().ok_or(AiError::NotConfigured)
    }

    /// Ask for click-worthy product names built from `keywords`.
    pub async fn generate_names(&self, category: &str, keywords: &[String]) -> AiResult<Vec<String>> {
        let generator = self.generator()?;
        if category.trim().is_empty() {
            return Err(AiError::InvalidInput("category is required".to_string()));
        }
        if keywords.is_empty() {
            return Err(AiError::InvalidInput("keywords must not be empty".to_string()));
        }

        let prompt = name_prompt(category, keywords);
        let text = generator.generate(&prompt).await?;
        tracing::debug!(category, keywords = keywords.len(), "generated product names");
        Ok(parse_json_array(&text))
    }

    /// Ask for a markdown product description. The model output is returned as-is.
    pub async fn generate_description(
        &self,
        product_name: &str,
        category: &str,
        features: &[String],
    ) -> AiResult<String> {
        let generator = self.generator()?;
        if product_name.trim().is_empty() || category.trim().is_empty() {
            return Err(AiError::InvalidInput(
                "product name and category are required".to_string(),
            ));
        }

        let prompt = description_prompt(product_name, category, features);
        let text = generator.generate(&prompt).await?;
        tracing::debug!(category, chars = text.chars().count(), "generated product description");
        Ok(text)
    }
}

impl core::fmt::Debug for ProductCopywriter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProductCopywriter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

fn name_prompt(category: &str, keywords: &[String]) -> String {
    format!(
        "역할: 한국 이커머스(쿠팡, 네이버 스마트스토어) 최고의 상품명 작명가\n\
         \n\
         작업: 다음 키워드와 카테고리를 사용하여 클릭을 부르는 매력적인 상품명 {NAME_CANDIDATES}개를 작성하세요.\n\
         \n\
         입력 정보:\n\
         - 카테고리: {category}\n\
         - 키워드: {keywords}\n\
         \n\
         규칙:\n\
         1. 한국어로 작성하십시오.\n\
         2. SEO와 클릭률을 모두 고려하십시오.\n\
         3. 특수문자는 필요한 경우에만 최소한으로 사용하십시오.\n\
         4. 오직 JSON 배열 포맷으로만 응답하십시오. (예: [\"상품명1\", \"상품명2\"])\n\
         5. 다른 말은 절대 하지 마십시오.\n",
        keywords = keywords.join(", "),
    )
}

fn description_prompt(product_name: &str, category: &str, features: &[String]) -> String {
    format!(
        "역할: 전문 쇼핑몰 마케터 및 카피라이터\n\
         \n\
         작업: 다음 상품에 대해 구매 욕구를 자극하는 상세 설명을 작성하세요.\n\
         \n\
         상품 정보:\n\
         - 상품명: {product_name}\n\
         - 카테고리: {category}\n\
         - 주요 특징: {features}\n\
         \n\
         작성 가이드:\n\
         1. 고객이 얻을 수 있는 혜택(Benefit)을 중심으로 서술하세요.\n\
         2. 신뢰감을 주면서도 감성적인 톤을 사용하세요.\n\
         3. 가독성을 위해 적절한 줄바꿈, 글머리 기호, 이모지를 사용하세요.\n\
         4. 마크다운(Markdown) 형식으로 깔끔하게 작성하세요.\n\
         5. 바로 사용할 수 있는 본문 내용만 출력하세요.\n",
        features = features.join(", "),
    )
}

/// Leniently extract a JSON string array from model output.
///
/// Markdown code fences are stripped and the outermost `[...]` span is parsed.
/// Anything that does not parse as an array of strings yields `vec![text]`.
pub fn parse_json_array(text: &str) -> Vec<String> {
    let cleaned = text.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let candidate = match (cleaned.find('['), cleaned.rfind(']')) {
        (Some(start), Some(end)) if start < end => &cleaned[start..=end],
        _ => cleaned,
    };

    match serde_json::from_str::<Vec<String>>(candidate) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(error = %err, "model output is not a JSON string array; using raw text");
            vec![text.to_string()]
        }
    }
}
