//! Demo dataset seeding.
//!
//! A fresh store is populated with two accounts, four providers and one
//! pending request. Each table is seeded independently and only while empty.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::ports::{
    DemoDataSeedRepository, DemoDataSeedRepositoryError, DemoRequestSeed, TableSeedResult,
};
use crate::domain::{NewProvider, NewUser, PasswordHash, Role};

/// Table names reported in seeding outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoTable {
    Users,
    Providers,
    Requests,
}

impl DemoTable {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Providers => "providers",
            Self::Requests => "requests",
        }
    }
}

/// Per-table outcome of one seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoSeedOutcome {
    pub users: TableSeedResult,
    pub providers: TableSeedResult,
    pub requests: TableSeedResult,
}

impl DemoSeedOutcome {
    pub fn tables(&self) -> [(DemoTable, TableSeedResult); 3] {
        [
            (DemoTable::Users, self.users),
            (DemoTable::Providers, self.providers),
            (DemoTable::Requests, self.requests),
        ]
    }
}

#[derive(Debug, Error)]
pub enum DemoDataSeedingError {
    #[error("failed to seed {table}: {source}")]
    Persistence {
        table: &'static str,
        #[source]
        source: DemoDataSeedRepositoryError,
    },
}

struct DemoAccount {
    name: &'static str,
    email: &'static str,
    password: &'static str,
    role: Role,
}

const DEMO_ACCOUNTS: [DemoAccount; 2] = [
    DemoAccount {
        name: "John Doe",
        email: "user@example.com",
        password: "ServiceFinder_User_2025!",
        role: Role::User,
    },
    DemoAccount {
        name: "Pro Fixer",
        email: "pro@service.com",
        password: "Expert_Pro_Secure_99",
        role: Role::Provider,
    },
];

/// (name, email, specialty, rating, jobs, image)
const DEMO_PROVIDERS: [(&str, &str, &str, f64, i64, &str); 4] = [
    (
        "Pro Fixer",
        "pro@service.com",
        "Mechanic",
        4.8,
        124,
        "https://images.unsplash.com/photo-1560250097-0b93528c311a?w=100&h=100&fit=crop",
    ),
    (
        "Speedy Cleaners",
        "clean@service.com",
        "Cleaning",
        4.9,
        250,
        "https://images.unsplash.com/photo-1573496359142-b8d87734a5a2?w=100&h=100&fit=crop",
    ),
    (
        "Electro Spark",
        "electro@service.com",
        "Electrician",
        4.7,
        180,
        "https://images.unsplash.com/photo-1595950653106-6c9ebd614d3a?w=100&h=100&fit=crop",
    ),
    (
        "Pure Water",
        "water@service.com",
        "Plumber",
        4.6,
        95,
        "https://images.unsplash.com/photo-1581092160607-ee22621dd758?w=100&h=100&fit=crop",
    ),
];

fn demo_users() -> Vec<NewUser> {
    DEMO_ACCOUNTS
        .iter()
        .map(|account| NewUser {
            name: account.name.to_owned(),
            email: account.email.to_owned(),
            password_hash: PasswordHash::derive(account.password),
            role: account.role,
        })
        .collect()
}

fn demo_providers() -> Vec<NewProvider> {
    DEMO_PROVIDERS
        .iter()
        .map(|&(name, email, specialty, rating, jobs, image_url)| NewProvider {
            name: name.to_owned(),
            email: email.to_owned(),
            specialty: specialty.to_owned(),
            rating,
            jobs,
            image_url: image_url.to_owned(),
        })
        .collect()
}

fn demo_requests() -> Vec<DemoRequestSeed> {
    vec![DemoRequestSeed {
        title: "Brake Repair".to_owned(),
        category: "Automotive".to_owned(),
        date: "2025-02-10".to_owned(),
        budget: 150,
        requester_name: "John Doe".to_owned(),
    }]
}

/// Applies the demo dataset through the seeding port.
#[derive(Clone)]
pub struct DemoDataSeeder<R> {
    repository: Arc<R>,
}

impl<R> DemoDataSeeder<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> DemoDataSeeder<R>
where
    R: DemoDataSeedRepository,
{
    /// Seed every empty table. Users go first so the demo request can
    /// reference its requester.
    ///
    /// # Errors
    ///
    /// Returns [`DemoDataSeedingError`] naming the table whose insert failed.
    pub async fn seed(&self) -> Result<DemoSeedOutcome, DemoDataSeedingError> {
        let failed = |table: DemoTable| {
            move |source: DemoDataSeedRepositoryError| DemoDataSeedingError::Persistence {
                table: table.as_str(),
                source,
            }
        };

        let users = self
            .repository
            .seed_users(&demo_users())
            .await
            .map_err(failed(DemoTable::Users))?;
        let providers = self
            .repository
            .seed_providers(&demo_providers())
            .await
            .map_err(failed(DemoTable::Providers))?;
        let requests = self
            .repository
            .seed_requests(&demo_requests())
            .await
            .map_err(failed(DemoTable::Requests))?;

        Ok(DemoSeedOutcome {
            users,
            providers,
            requests,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockDemoDataSeedRepository;
    use mockall::Sequence;
    use rstest::rstest;

    #[rstest]
    fn demo_accounts_store_digests_not_passwords() {
        let users = demo_users();
        assert_eq!(users.len(), 2);
        let john = &users[0];
        assert_eq!(john.role, Role::User);
        assert!(john.password_hash.verify("ServiceFinder_User_2025!"));
        assert!(!john.password_hash.encode().contains("ServiceFinder"));
        assert_eq!(users[1].role, Role::Provider);
    }

    #[rstest]
    fn demo_providers_have_unique_names_and_emails() {
        let providers = demo_providers();
        let mut names: Vec<_> = providers.iter().map(|p| p.name.as_str()).collect();
        let mut emails: Vec<_> = providers.iter().map(|p| p.email.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        emails.sort_unstable();
        emails.dedup();
        assert_eq!(names.len(), 4);
        assert_eq!(emails.len(), 4);
    }

    #[rstest]
    #[tokio::test]
    async fn seeds_users_before_requests() {
        let mut repo = MockDemoDataSeedRepository::new();
        let mut seq = Sequence::new();
        repo.expect_seed_users()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|users| Ok(TableSeedResult::Applied { rows: users.len() as u64 }));
        repo.expect_seed_providers()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|providers| {
                Ok(TableSeedResult::Applied {
                    rows: providers.len() as u64,
                })
            });
        repo.expect_seed_requests()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(TableSeedResult::AlreadyPopulated));

        let outcome = DemoDataSeeder::new(Arc::new(repo))
            .seed()
            .await
            .expect("seeding succeeds");

        assert_eq!(outcome.users, TableSeedResult::Applied { rows: 2 });
        assert_eq!(outcome.providers, TableSeedResult::Applied { rows: 4 });
        assert_eq!(outcome.requests, TableSeedResult::AlreadyPopulated);
    }

    #[rstest]
    #[tokio::test]
    async fn failure_names_the_table() {
        let mut repo = MockDemoDataSeedRepository::new();
        repo.expect_seed_users()
            .returning(|_| Ok(TableSeedResult::AlreadyPopulated));
        repo.expect_seed_providers()
            .returning(|_| Err(DemoDataSeedRepositoryError::query("boom")));
        repo.expect_seed_requests().never();

        let error = DemoDataSeeder::new(Arc::new(repo))
            .seed()
            .await
            .expect_err("seeding fails");
        assert!(error.to_string().starts_with("failed to seed providers"));
    }
}
