mod http_auth_client;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::auth::dtos::{
    MessageResponseDto, SignInRequestDto, SignInResponseDto, SignUpRequestDto,
};

/// Authentication endpoints of the backend
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/signin`
    async fn sign_in(&self, request: &SignInRequestDto) -> Result<SignInResponseDto>;

    /// `POST /auth/signup`; answers with a confirmation message
    async fn sign_up(&self, request: &SignUpRequestDto) -> Result<MessageResponseDto>;
}
