mod auth_dto;

pub use auth_dto::{MessageResponseDto, SignInRequestDto, SignInResponseDto, SignUpRequestDto};
