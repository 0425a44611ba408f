use sqlx::FromRow;

/// Department value that grants access to the admin commands.
pub const ADMIN_DEPARTMENT: &str = "admin";

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserEntity {
    pub tg_id: i64,
    pub name: String,
    pub department: String,
    pub role: String,
}

impl UserEntity {
    pub fn new(
        tg_id: i64,
        name: impl Into<String>,
        department: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self { tg_id, name: name.into(), department: department.into(), role: role.into() }
    }

    /// Whether this user belongs to the admin department.
    ///
    /// This is independent from the allow-list: a user can be allowed to use
    /// the bot without being an admin, and the seeded admin row (department
    /// `IT`, role `admin`) does not pass this check.
    pub fn is_admin(&self) -> bool {
        self.department == ADMIN_DEPARTMENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_admin_checks_department_only() {
        assert!(UserEntity::new(1, "Ann", "admin", "employee").is_admin());
        assert!(!UserEntity::new(2, "Admin", "IT", "admin").is_admin());
    }
}
