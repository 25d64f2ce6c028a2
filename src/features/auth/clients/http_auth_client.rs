use async_trait::async_trait;

use crate::core::error::Result;
use crate::core::http::ApiClient;
use crate::features::auth::clients::AuthApi;
use crate::features::auth::dtos::{
    MessageResponseDto, SignInRequestDto, SignInResponseDto, SignUpRequestDto,
};

#[async_trait]
impl AuthApi for ApiClient {
    async fn sign_in(&self, request: &SignInRequestDto) -> Result<SignInResponseDto> {
        tracing::debug!("Signing in as {}", request.username);

        let builder = self.post("/auth/signin").json(request);
        self.send_json(builder, "sign in").await
    }

    async fn sign_up(&self, request: &SignUpRequestDto) -> Result<MessageResponseDto> {
        tracing::debug!("Registering {} with roles {:?}", request.username, request.roles);

        let builder = self.post("/auth/signup").json(request);
        self.send_json(builder, "sign up").await
    }
}
