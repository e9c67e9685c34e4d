use std::sync::Arc;

use axum::extract::FromRef;
use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use crate::identity::AdminKey;
use crate::infra::cache::RedisOtpThrottle;
use crate::infra::db::{
    DbAttendeeRepository, DbAwardEventRepository, DbCandidateDirectory, DbCategoryRepository,
    DbEventRepository, DbInviteCodeRepository, DbNomineeRepository, DbOtpRepository,
    DbRecipientRepository, DbVoteRepository,
};
use crate::infra::sms::HttpSmsSender;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub sms: HttpSmsSender,
    pub admin_key: AdminKey,
    /// Normalized.
    pub admin_phones: Arc<Vec<String>>,
}

impl FromRef<AppState> for AdminKey {
    fn from_ref(state: &AppState) -> Self {
        state.admin_key.clone()
    }
}

impl AppState {
    pub fn event_repo(&self) -> DbEventRepository {
        DbEventRepository {
            db: self.db.clone(),
        }
    }

    pub fn award_event_repo(&self) -> DbAwardEventRepository {
        DbAwardEventRepository {
            db: self.db.clone(),
        }
    }

    pub fn attendee_repo(&self) -> DbAttendeeRepository {
        DbAttendeeRepository {
            db: self.db.clone(),
        }
    }

    pub fn invite_repo(&self) -> DbInviteCodeRepository {
        DbInviteCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn category_repo(&self) -> DbCategoryRepository {
        DbCategoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn nominee_repo(&self) -> DbNomineeRepository {
        DbNomineeRepository {
            db: self.db.clone(),
        }
    }

    pub fn candidate_directory(&self) -> DbCandidateDirectory {
        DbCandidateDirectory {
            db: self.db.clone(),
        }
    }

    pub fn vote_repo(&self) -> DbVoteRepository {
        DbVoteRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipient_repo(&self) -> DbRecipientRepository {
        DbRecipientRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_throttle(&self) -> RedisOtpThrottle {
        RedisOtpThrottle {
            pool: self.redis.clone(),
        }
    }

    pub fn admin_phones(&self) -> Vec<String> {
        self.admin_phones.as_ref().clone()
    }
}
