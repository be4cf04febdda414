use winnerlens_auth::{JwtClaims, SubscriptionTier};
use winnerlens_core::UserId;

/// Authenticated caller of a request.
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    user_id: UserId,
    email: String,
    subscription_tier: SubscriptionTier,
}

impl UserContext {
    pub fn new(user_id: UserId, email: String, subscription_tier: SubscriptionTier) -> Self {
        Self {
            user_id,
            email,
            subscription_tier,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subscription_tier(&self) -> SubscriptionTier {
        self.subscription_tier
    }
}

impl From<JwtClaims> for UserContext {
    fn from(claims: JwtClaims) -> Self {
        Self::new(claims.sub, claims.email, claims.subscription_tier)
    }
}
