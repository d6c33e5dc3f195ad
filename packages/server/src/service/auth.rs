//! Signup and login.
//!
//! Signup is the one place a tenant comes into existence: dealership,
//! owner account, and default site configuration are created together,
//! and the response carries a freshly issued token so the new owner is
//! signed in immediately.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use autolot_core::model::{AdminUser, Dealership, NewAdminUser, NewDealership, SiteConfig};
use autolot_core::{AdminRole, Error, Slug, TenantContext};

use crate::auth::password::{hash_password, verify_password, MIN_PASSWORD_LENGTH};
use crate::auth::TokenService;
use crate::store::{AdminUserStore, DealershipStore, SiteConfigStore};

/// Signup payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub dealership_name: String,
    pub slug: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Login payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Both flows answer with a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

pub struct AuthService {
    dealerships: Arc<DealershipStore>,
    admin_users: Arc<AdminUserStore>,
    site_configs: Arc<SiteConfigStore>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        dealerships: Arc<DealershipStore>,
        admin_users: Arc<AdminUserStore>,
        site_configs: Arc<SiteConfigStore>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            dealerships,
            admin_users,
            site_configs,
            tokens,
        }
    }

    /// Creates a dealership, its owner account, and its default site
    /// configuration, then signs the owner in.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a malformed slug, email, or password;
    /// [`Error::Conflict`] when the email or slug is taken.
    pub fn signup(&self, request: SignupRequest) -> Result<AuthResponse, Error> {
        let slug = Slug::parse(&request.slug)?;
        validate_signup_fields(&request)?;

        if self.dealerships.exists_by_email(&request.email)
            || self.admin_users.exists_by_email(&request.email)
        {
            return Err(Error::conflict("Email already exists"));
        }

        let password_hash = hash_password(&request.password)?;
        let now = Utc::now();

        let dealership = self.dealerships.insert(Dealership::create(
            NewDealership {
                name: request.dealership_name,
                slug,
                email: request.email.clone(),
            },
            now,
        ))?;

        let admin = match self.admin_users.insert(AdminUser::create(
            NewAdminUser {
                dealership_id: dealership.id,
                email: request.email,
                password_hash,
                full_name: request.full_name,
                role: AdminRole::Owner,
            },
            now,
        )) {
            Ok(admin) => admin,
            Err(e) => {
                // Lost a race on the admin email after the dealership was
                // registered: unwind so the slug is not left orphaned.
                self.dealerships.remove(dealership.id);
                return Err(e);
            }
        };

        // Seed the default site config under a context bound to the new
        // tenant; even system-side writes go through the scoping contract.
        let mut seed_ctx = TenantContext::new();
        seed_ctx.bind_tenant(dealership.id);
        self.site_configs
            .insert(&seed_ctx, SiteConfig::default_for(dealership.id, now))?;

        info!(dealership = %dealership.slug, "dealership signed up");

        let token =
            self.tokens
                .issue(admin.id, dealership.id, &admin.email, admin.role, Utc::now())?;
        Ok(AuthResponse { token })
    }

    /// Verifies credentials and issues a token.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCredentials`] for unknown email and wrong password
    /// alike; the response does not reveal which.
    pub fn login(&self, request: LoginRequest) -> Result<AuthResponse, Error> {
        let admin = self
            .admin_users
            .find_by_email(&request.email)
            .ok_or(Error::InvalidCredentials)?;

        if !verify_password(&request.password, &admin.password_hash)? {
            return Err(Error::InvalidCredentials);
        }

        let token = self.tokens.issue(
            admin.id,
            admin.dealership_id,
            &admin.email,
            admin.role,
            Utc::now(),
        )?;
        Ok(AuthResponse { token })
    }
}

fn validate_signup_fields(request: &SignupRequest) -> Result<(), Error> {
    if request.dealership_name.trim().is_empty() {
        return Err(Error::Validation {
            field: "dealershipName",
            message: "is required".to_string(),
        });
    }
    if request.full_name.trim().is_empty() {
        return Err(Error::Validation {
            field: "fullName",
            message: "is required".to_string(),
        });
    }
    if !request.email.contains('@') || request.email.trim().is_empty() {
        return Err(Error::Validation {
            field: "email",
            message: "must be a valid email address".to_string(),
        });
    }
    if request.password.len() < MIN_PASSWORD_LENGTH {
        return Err(Error::Validation {
            field: "password",
            message: format!("must be at least {MIN_PASSWORD_LENGTH} characters"),
        });
    }
    Ok(())
}
