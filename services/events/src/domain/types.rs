use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

/// Attendance event that attendees register for and check in to.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub date: NaiveDate,
    pub invite_only: bool,
    pub created_at: DateTime<Utc>,
}

/// Visual identity of an award ceremony.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Branding {
    pub header_image: Option<String>,
    pub sponsor_images: Vec<String>,
    /// Marks one entry of `sponsor_images` as the digital media sponsor.
    pub digital_media_sponsor_index: Option<usize>,
}

impl Branding {
    /// The sponsor index, when present, must address an existing sponsor image.
    pub fn is_consistent(&self) -> bool {
        self.digital_media_sponsor_index
            .is_none_or(|i| i < self.sponsor_images.len())
    }

    pub fn digital_media_sponsor(&self) -> Option<&str> {
        self.digital_media_sponsor_index
            .and_then(|i| self.sponsor_images.get(i))
            .map(String::as_str)
    }
}

/// Standalone voting ceremony.
#[derive(Debug, Clone)]
pub struct AwardEvent {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub branding: Branding,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendeeStatus {
    Registered,
    CheckedIn,
}

impl AttendeeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::CheckedIn => "checked_in",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "registered" => Some(Self::Registered),
            "checked_in" => Some(Self::CheckedIn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Attendee {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub email: Option<String>,
    /// Normalized ten-digit phone.
    pub phone: Option<String>,
    pub category: Option<String>,
    /// Free text as entered, comma-separated.
    pub guest_names: Option<String>,
    pub meal_preference: Option<String>,
    pub status: AttendeeStatus,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Attendee {
    pub fn guests(&self) -> Vec<String> {
        self.guest_names
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// Single-use registration code bound to one event.
#[derive(Debug, Clone)]
pub struct InviteCode {
    pub id: Uuid,
    pub code: String,
    pub event_id: Uuid,
    pub is_used: bool,
    pub created_at: DateTime<Utc>,
}

/// Who owns a category, which also decides the voting flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryOwner {
    /// Attendance flow: attendees of the event are the nominees.
    Event(Uuid),
    /// Award flow: nominees are managed per award event.
    AwardEvent(Uuid),
}

impl CategoryOwner {
    pub fn id(self) -> Uuid {
        match self {
            Self::Event(id) | Self::AwardEvent(id) => id,
        }
    }

    /// Granularity of one-vote-per-phone for categories with this owner.
    pub fn uniqueness_scope(self) -> UniquenessScope {
        match self {
            Self::AwardEvent(_) => UniquenessScope::Event,
            Self::Event(_) => UniquenessScope::Category,
        }
    }
}

/// Key granularity at which one vote per phone is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniquenessScope {
    /// One vote per phone across every category of the owning event.
    Event,
    /// One vote per phone per category.
    Category,
}

impl UniquenessScope {
    /// Value stored in `votes.uniqueness_key` for a vote in `category`.
    pub fn key(self, category: &Category) -> String {
        match self {
            Self::Event => format!("event:{}", category.owner.id()),
            Self::Category => format!("category:{}", category.id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: Uuid,
    pub owner: CategoryOwner,
    pub name: String,
    pub description: String,
    /// Accepts votes.
    pub is_active: bool,
    /// Leaderboard visible to the public.
    pub show_results: bool,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn uniqueness_scope(&self) -> UniquenessScope {
        self.owner.uniqueness_scope()
    }

    pub fn uniqueness_key(&self) -> String {
        self.uniqueness_scope().key(self)
    }
}

/// Partial update of a category's voting state.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryFlags {
    pub is_active: Option<bool>,
    pub show_results: Option<bool>,
}

impl CategoryFlags {
    pub fn is_empty(&self) -> bool {
        self.is_active.is_none() && self.show_results.is_none()
    }
}

/// Award-flow candidate.
#[derive(Debug, Clone)]
pub struct Nominee {
    pub id: Uuid,
    pub award_event_id: Uuid,
    /// `None` = eligible in every category of the award event.
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Something a voter can pick in a category: a nominee (award flow) or an
/// attendee (attendance flow).
#[derive(Debug, Clone)]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    /// Event or award event the candidate belongs to.
    pub owner_id: Uuid,
    /// Restricts the candidate to one category; `None` = any category of the owner.
    pub category_id: Option<Uuid>,
}

impl Candidate {
    pub fn is_eligible_in(&self, category: &Category) -> bool {
        self.owner_id == category.owner.id()
            && self.category_id.is_none_or(|id| id == category.id)
    }
}

/// A recorded vote. Never updated or deleted individually.
#[derive(Debug, Clone)]
pub struct Vote {
    pub id: Uuid,
    pub category_id: Uuid,
    /// Owner of the category.
    pub event_id: Uuid,
    pub nominee_id: Uuid,
    pub voter_phone: String,
    pub voter_name: Option<String>,
    /// `None` counts as 1.
    pub weight: Option<i32>,
    pub uniqueness_key: String,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    pub fn effective_weight(&self) -> i64 {
        i64::from(self.weight.unwrap_or(1))
    }
}

/// Summed vote weight for one nominee in one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NomineeTally {
    pub nominee_id: Uuid,
    pub vote_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub nominee_id: Uuid,
    pub nominee_name: String,
    pub vote_count: i64,
}

#[derive(Debug, Clone)]
pub struct Leaderboard {
    pub category_id: Uuid,
    pub category_name: String,
    /// Always visible, even while the ranking is hidden.
    pub total_votes: u64,
    pub results_visible: bool,
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientStatus {
    Generated,
    Redeemed,
}

impl RecipientStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::Redeemed => "redeemed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "generated" => Some(Self::Generated),
            "redeemed" => Some(Self::Redeemed),
            _ => None,
        }
    }
}

/// Bulk-imported award attendee with a redemption token.
#[derive(Debug, Clone)]
pub struct Recipient {
    pub id: Uuid,
    pub award_event_id: Uuid,
    pub name: String,
    pub follower_count: i64,
    pub token: String,
    pub status: RecipientStatus,
    pub redeemed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Outcome of a recipient import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub imported: u64,
    /// Rows dropped because no unique token could be generated.
    pub skipped: u64,
}

/// One-time SMS verification code.
#[derive(Debug, Clone)]
pub struct Otp {
    pub id: Uuid,
    pub phone: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Otp {
    pub fn accepts(&self, code: &str, now: DateTime<Utc>) -> bool {
        !self.verified && self.expires_at > now && self.code == code
    }
}

/// Number of ranked entries a leaderboard shows.
pub const LEADERBOARD_TOP_N: u64 = 10;

/// Attempts to find an unused recipient token before the row is skipped.
pub const TOKEN_MAX_ATTEMPTS: usize = 10;

/// Random bytes in an invite code (hex-encoded, so twice as many characters).
pub const INVITE_CODE_BYTES: usize = 4;

/// OTP length in digits.
pub const OTP_LEN: usize = 6;

/// OTP time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 300;

/// Minimum spacing between OTP requests for one phone, in seconds.
pub const OTP_RESEND_COOLDOWN_SECS: u64 = 60;
