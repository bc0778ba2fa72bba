// src/models/user.rs

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::error::AppError;

/// What a user can do. Fixed at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Landing page after login.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Teacher => "/teacher/dashboard",
            Role::Student => "/student/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Teacher => f.write_str("Teacher"),
            Role::Student => f.write_str("Student"),
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            _ => Err(AppError::BadRequest(
                "User type must be Teacher or Student.".to_string(),
            )),
        }
    }
}

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,

    /// Unique login name.
    pub name: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub role: Role,

    /// School year, only set for students.
    pub year_level: Option<i64>,

    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Raw sign-up form. Every field arrives as text so that a bad value
/// becomes a form error instead of a rejected request.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub user_type: String,
    #[serde(default)]
    pub year_level: String,
}

/// Validated input for creating a new user.
#[derive(Debug, Validate)]
pub struct CreateUserRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username length must be between 3 and 50 characters."
    ))]
    pub name: String,
    #[validate(length(
        min = 4,
        max = 128,
        message = "Password length must be between 4 and 128 characters."
    ))]
    pub password: String,
    pub role: Role,
    #[validate(range(min = 1, max = 13, message = "Year level must be between 1 and 13."))]
    pub year_level: Option<i64>,
}

impl TryFrom<RegisterForm> for CreateUserRequest {
    type Error = AppError;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        let name = form.name.trim().to_string();
        if name.is_empty() || form.password.is_empty() || form.user_type.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Name, password and user type are required.".to_string(),
            ));
        }

        let role: Role = form.user_type.parse()?;

        let year_level = match role {
            Role::Teacher => None,
            Role::Student => {
                let raw = form.year_level.trim();
                if raw.is_empty() {
                    return Err(AppError::BadRequest(
                        "Year level is required for students.".to_string(),
                    ));
                }
                Some(raw.parse::<i64>().map_err(|_| {
                    AppError::BadRequest("Year level must be a whole number.".to_string())
                })?)
            }
        };

        Ok(Self {
            name,
            password: form.password,
            role,
            year_level,
        })
    }
}

/// DTO for user login.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(user_type: &str, year_level: &str) -> RegisterForm {
        RegisterForm {
            name: "  ada  ".to_string(),
            password: "secret".to_string(),
            user_type: user_type.to_string(),
            year_level: year_level.to_string(),
        }
    }

    #[test]
    fn student_requires_year_level() {
        let err = CreateUserRequest::try_from(form("Student", "")).unwrap_err();
        assert!(err.is_form_error());
    }

    #[test]
    fn teacher_ignores_year_level() {
        let req = CreateUserRequest::try_from(form("Teacher", "9")).unwrap();
        assert_eq!(req.role, Role::Teacher);
        assert_eq!(req.year_level, None);
        assert_eq!(req.name, "ada");
    }

    #[test]
    fn student_year_level_is_range_checked() {
        let req = CreateUserRequest::try_from(form("student", "42")).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(CreateUserRequest::try_from(form("admin", "")).is_err());
    }
}
