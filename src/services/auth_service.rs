use crate::database::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::*;
use crate::utils::*;

const USER_COLUMNS: &str = "id, email, password_hash, name, phone_number, \
                            phone_verified, balance, is_admin, created_at";

#[derive(Clone)]
pub struct AuthService {
    pool: DbPool,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(pool: DbPool, jwt_service: JwtService) -> Self {
        Self { pool, jwt_service }
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<UserResponse> {
        if request.password != request.confirm_password {
            return Err(AppError::ValidationError(
                "Passwords do not match".to_string(),
            ));
        }

        if !validate_somali_phone(&request.phone_number) {
            return Err(AppError::ValidationError(
                "Invalid phone number, use Somaliland (63-70) or Somalia (61, 62, 90-99) numbers"
                    .to_string(),
            ));
        }

        let phone_number = normalize_somali_phone(&request.phone_number);

        // Early exits only; the UNIQUE constraints below are the real guard
        let email_taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
            .bind(&request.email)
            .fetch_one(&self.pool)
            .await?;
        if email_taken > 0 {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let phone_taken: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE phone_number = ?")
                .bind(&phone_number)
                .fetch_one(&self.pool)
                .await?;
        if phone_taken > 0 {
            return Err(AppError::Conflict(
                "Phone number already registered".to_string(),
            ));
        }

        let password_hash = hash_password(&request.password)?;

        let user_id = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, name, phone_number)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&request.email)
        .bind(&password_hash)
        .bind(&request.name)
        .bind(&phone_number)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, "Email or phone number already registered"))?
        .last_insert_rowid();

        log::info!("Registered user {user_id} with phone {phone_number}");

        let user = self.get_user_by_id(user_id).await?;
        Ok(UserResponse::from(user))
    }

    /// Phone-based login. Unknown phone and bad password produce the same
    /// error so accounts cannot be enumerated.
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        if !validate_somali_phone(&request.phone_number) {
            return Err(AppError::ValidationError(
                "Invalid phone number".to_string(),
            ));
        }

        let phone_number = normalize_somali_phone(&request.phone_number);

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE phone_number = ?"
        ))
        .bind(&phone_number)
        .fetch_optional(&self.pool)
        .await?;

        let user =
            user.ok_or_else(|| AppError::AuthError("Invalid phone number or password".to_string()))?;

        let is_valid = verify_password(&request.password, &user.password_hash)?;
        if !is_valid {
            return Err(AppError::AuthError(
                "Invalid phone number or password".to_string(),
            ));
        }

        self.issue_tokens(user)
    }

    pub async fn refresh_token(&self, token: &str) -> AppResult<AuthResponse> {
        let claims = self.jwt_service.verify_refresh_token(token)?;
        let user_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::AuthError("Invalid token subject".to_string()))?;

        let user = self.get_user_by_id(user_id).await.map_err(|_| {
            AppError::AuthError("User for refresh token no longer exists".to_string())
        })?;

        self.issue_tokens(user)
    }

    pub async fn get_user_by_id(&self, user_id: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    fn issue_tokens(&self, user: User) -> AppResult<AuthResponse> {
        let access_token = self.jwt_service.generate_access_token(user.id)?;
        let refresh_token = self.jwt_service.generate_refresh_token(user.id)?;

        Ok(AuthResponse {
            user: UserResponse::from(user),
            access_token,
            refresh_token,
            expires_in: self.jwt_service.get_access_token_expires_in(),
        })
    }
}
