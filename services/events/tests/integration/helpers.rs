use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use ovation_domain::pagination::PageRequest;
use ovation_events::domain::repository::{
    AttendeeRepository, AwardEventRepository, CandidateDirectory, CategoryRepository,
    EventRepository, InviteCodeRepository, NomineeRepository, OtpRepository, OtpThrottle,
    RecipientRepository, SmsSender, VoteRepository,
};
use ovation_events::domain::types::{
    Attendee, AttendeeStatus, AwardEvent, Branding, Candidate, Category, CategoryFlags,
    CategoryOwner, Event, InviteCode, Nominee, NomineeTally, Otp, Recipient, RecipientStatus, Vote,
};
use ovation_events::error::EventsServiceError;

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_event(invite_only: bool) -> Event {
    Event {
        id: Uuid::now_v7(),
        name: "Annual Gala".to_owned(),
        date: NaiveDate::from_ymd_opt(2026, 12, 5).unwrap(),
        invite_only,
        created_at: Utc::now(),
    }
}

pub fn test_award_event() -> AwardEvent {
    AwardEvent {
        id: Uuid::now_v7(),
        name: "Creator Awards".to_owned(),
        description: String::new(),
        branding: Branding::default(),
        is_active: true,
        created_at: Utc::now(),
    }
}

pub fn test_category(owner: CategoryOwner, name: &str, show_results: bool) -> Category {
    Category {
        id: Uuid::now_v7(),
        owner,
        name: name.to_owned(),
        description: String::new(),
        is_active: true,
        show_results,
        created_at: Utc::now(),
    }
}

/// A candidate eligible in every category of `owner_id`.
pub fn test_candidate(owner_id: Uuid, name: &str) -> Candidate {
    Candidate {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        owner_id,
        category_id: None,
    }
}

/// A vote row as the store would hold it, bypassing admission.
pub fn recorded_vote(category: &Category, nominee_id: Uuid, phone: &str) -> Vote {
    Vote {
        id: Uuid::now_v7(),
        category_id: category.id,
        event_id: category.owner.id(),
        nominee_id,
        voter_phone: phone.to_owned(),
        voter_name: None,
        weight: None,
        uniqueness_key: category.uniqueness_key(),
        created_at: Utc::now(),
    }
}

pub fn test_invite(event_id: Uuid, code: &str) -> InviteCode {
    InviteCode {
        id: Uuid::now_v7(),
        code: code.to_owned(),
        event_id,
        is_used: false,
        created_at: Utc::now(),
    }
}

pub fn test_otp(phone: &str, code: &str, expires_at: DateTime<Utc>) -> Otp {
    Otp {
        id: Uuid::now_v7(),
        phone: phone.to_owned(),
        code: code.to_owned(),
        expires_at,
        verified: false,
        created_at: Utc::now(),
    }
}

pub fn gateway_down() -> EventsServiceError {
    EventsServiceError::Internal(anyhow::anyhow!("sms gateway returned 503"))
}

// ── MockEventRepo ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockEventRepo {
    pub events: Arc<Mutex<Vec<Event>>>,
}

impl MockEventRepo {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: Arc::new(Mutex::new(events)),
        }
    }
}

impl EventRepository for MockEventRepo {
    async fn create(&self, event: &Event) -> Result<(), EventsServiceError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Event>, EventsServiceError> {
        Ok(self.events.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Event>, EventsServiceError> {
        Ok(self.events.lock().unwrap().clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, EventsServiceError> {
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| e.id != id);
        Ok(events.len() != before)
    }
}

// ── MockAwardEventRepo ───────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockAwardEventRepo {
    pub award_events: Arc<Mutex<Vec<AwardEvent>>>,
}

impl MockAwardEventRepo {
    pub fn new(award_events: Vec<AwardEvent>) -> Self {
        Self {
            award_events: Arc::new(Mutex::new(award_events)),
        }
    }
}

impl AwardEventRepository for MockAwardEventRepo {
    async fn create(&self, award_event: &AwardEvent) -> Result<(), EventsServiceError> {
        self.award_events.lock().unwrap().push(award_event.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AwardEvent>, EventsServiceError> {
        Ok(self
            .award_events
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn list(&self, active_only: bool) -> Result<Vec<AwardEvent>, EventsServiceError> {
        Ok(self
            .award_events
            .lock()
            .unwrap()
            .iter()
            .filter(|a| !active_only || a.is_active)
            .cloned()
            .collect())
    }

    async fn update(&self, award_event: &AwardEvent) -> Result<bool, EventsServiceError> {
        let mut award_events = self.award_events.lock().unwrap();
        match award_events.iter_mut().find(|a| a.id == award_event.id) {
            Some(existing) => {
                *existing = award_event.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, EventsServiceError> {
        let mut award_events = self.award_events.lock().unwrap();
        let before = award_events.len();
        award_events.retain(|a| a.id != id);
        Ok(award_events.len() != before)
    }
}

// ── MockAttendeeRepo ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockAttendeeRepo {
    pub attendees: Arc<Mutex<Vec<Attendee>>>,
    /// Makes `create` fail, as a dropped connection would.
    pub fail_create: bool,
}

impl MockAttendeeRepo {
    pub fn failing() -> Self {
        Self {
            fail_create: true,
            ..Self::default()
        }
    }
}

impl AttendeeRepository for MockAttendeeRepo {
    async fn create(&self, attendee: &Attendee) -> Result<(), EventsServiceError> {
        if self.fail_create {
            return Err(EventsServiceError::Internal(anyhow::anyhow!(
                "connection reset"
            )));
        }
        self.attendees.lock().unwrap().push(attendee.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Attendee>, EventsServiceError> {
        Ok(self
            .attendees
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn list_by_event(
        &self,
        event_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Attendee>, EventsServiceError> {
        Ok(self
            .attendees
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.event_id == event_id)
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn check_in(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, EventsServiceError> {
        let mut attendees = self.attendees.lock().unwrap();
        match attendees
            .iter_mut()
            .find(|a| a.id == id && a.status == AttendeeStatus::Registered)
        {
            Some(a) => {
                a.status = AttendeeStatus::CheckedIn;
                a.checked_in_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockInviteRepo ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockInviteRepo {
    pub invites: Arc<Mutex<Vec<InviteCode>>>,
}

impl MockInviteRepo {
    pub fn new(invites: Vec<InviteCode>) -> Self {
        Self {
            invites: Arc::new(Mutex::new(invites)),
        }
    }
}

impl InviteCodeRepository for MockInviteRepo {
    async fn create(&self, invite: &InviteCode) -> Result<(), EventsServiceError> {
        self.invites.lock().unwrap().push(invite.clone());
        Ok(())
    }

    async fn find_by_code(
        &self,
        event_id: Uuid,
        code: &str,
    ) -> Result<Option<InviteCode>, EventsServiceError> {
        Ok(self
            .invites
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.event_id == event_id && i.code == code)
            .cloned())
    }

    async fn list_by_event(&self, event_id: Uuid) -> Result<Vec<InviteCode>, EventsServiceError> {
        Ok(self
            .invites
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn mark_used(&self, id: Uuid) -> Result<bool, EventsServiceError> {
        let mut invites = self.invites.lock().unwrap();
        match invites.iter_mut().find(|i| i.id == id && !i.is_used) {
            Some(i) => {
                i.is_used = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockCategoryRepo ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCategoryRepo {
    pub categories: Arc<Mutex<Vec<Category>>>,
}

impl MockCategoryRepo {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: Arc::new(Mutex::new(categories)),
        }
    }
}

impl CategoryRepository for MockCategoryRepo {
    async fn create(&self, category: &Category) -> Result<(), EventsServiceError> {
        self.categories.lock().unwrap().push(category.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>, EventsServiceError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_by_owner(
        &self,
        owner: CategoryOwner,
    ) -> Result<Vec<Category>, EventsServiceError> {
        Ok(self
            .categories
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.owner == owner)
            .cloned()
            .collect())
    }

    async fn update_flags(
        &self,
        id: Uuid,
        flags: CategoryFlags,
    ) -> Result<bool, EventsServiceError> {
        let mut categories = self.categories.lock().unwrap();
        let Some(category) = categories.iter_mut().find(|c| c.id == id) else {
            return Ok(false);
        };
        if let Some(is_active) = flags.is_active {
            category.is_active = is_active;
        }
        if let Some(show_results) = flags.show_results {
            category.show_results = show_results;
        }
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, EventsServiceError> {
        let mut categories = self.categories.lock().unwrap();
        let before = categories.len();
        categories.retain(|c| c.id != id);
        Ok(categories.len() != before)
    }
}

// ── MockNomineeRepo ──────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockNomineeRepo {
    pub nominees: Arc<Mutex<Vec<Nominee>>>,
}

impl NomineeRepository for MockNomineeRepo {
    async fn create(&self, nominee: &Nominee) -> Result<(), EventsServiceError> {
        self.nominees.lock().unwrap().push(nominee.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Nominee>, EventsServiceError> {
        Ok(self
            .nominees
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned())
    }

    async fn list_by_award_event(
        &self,
        award_event_id: Uuid,
        category_id: Option<Uuid>,
    ) -> Result<Vec<Nominee>, EventsServiceError> {
        let mut nominees: Vec<Nominee> = self
            .nominees
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.award_event_id == award_event_id)
            .filter(|n| category_id.is_none() || n.category_id.is_none() || n.category_id == category_id)
            .cloned()
            .collect();
        nominees.sort_by_key(|n| n.position);
        Ok(nominees)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, EventsServiceError> {
        let mut nominees = self.nominees.lock().unwrap();
        let before = nominees.len();
        nominees.retain(|n| n.id != id);
        Ok(nominees.len() != before)
    }
}

// ── MockCandidates ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockCandidates {
    pub candidates: Vec<Candidate>,
}

impl MockCandidates {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

impl CandidateDirectory for MockCandidates {
    async fn find_candidate(
        &self,
        category: &Category,
        candidate_id: Uuid,
    ) -> Result<Option<Candidate>, EventsServiceError> {
        Ok(self
            .candidates
            .iter()
            .find(|c| c.id == candidate_id && c.owner_id == category.owner.id())
            .cloned())
    }

    async fn names(
        &self,
        _category: &Category,
        ids: &[Uuid],
    ) -> Result<HashMap<Uuid, String>, EventsServiceError> {
        Ok(self
            .candidates
            .iter()
            .filter(|c| ids.contains(&c.id))
            .map(|c| (c.id, c.name.clone()))
            .collect())
    }
}

// ── MockVoteRepo ─────────────────────────────────────────────────────────────

/// In-memory vote store. `insert` enforces the `(uniqueness_key, voter_phone)`
/// constraint under the lock, like the database unique index.
#[derive(Clone, Default)]
pub struct MockVoteRepo {
    pub votes: Arc<Mutex<Vec<Vote>>>,
}

impl MockVoteRepo {
    pub fn new(votes: Vec<Vote>) -> Self {
        Self {
            votes: Arc::new(Mutex::new(votes)),
        }
    }

    pub fn votes_handle(&self) -> Arc<Mutex<Vec<Vote>>> {
        Arc::clone(&self.votes)
    }
}

impl VoteRepository for MockVoteRepo {
    async fn find_in_scope(
        &self,
        uniqueness_key: &str,
        voter_phone: &str,
    ) -> Result<Option<Vote>, EventsServiceError> {
        let found = self
            .votes
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.uniqueness_key == uniqueness_key && v.voter_phone == voter_phone)
            .cloned();
        // Let concurrent submissions interleave between the read and the insert.
        tokio::task::yield_now().await;
        Ok(found)
    }

    async fn insert(&self, vote: &Vote) -> Result<bool, EventsServiceError> {
        let mut votes = self.votes.lock().unwrap();
        if votes
            .iter()
            .any(|v| v.uniqueness_key == vote.uniqueness_key && v.voter_phone == vote.voter_phone)
        {
            return Ok(false);
        }
        votes.push(vote.clone());
        Ok(true)
    }

    async fn count_by_category(&self, category_id: Uuid) -> Result<u64, EventsServiceError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.category_id == category_id)
            .count() as u64)
    }

    async fn tally_by_category(
        &self,
        category_id: Uuid,
        limit: u64,
    ) -> Result<Vec<NomineeTally>, EventsServiceError> {
        let mut sums: HashMap<Uuid, i64> = HashMap::new();
        for vote in self
            .votes
            .lock()
            .unwrap()
            .iter()
            .filter(|v| v.category_id == category_id)
        {
            *sums.entry(vote.nominee_id).or_default() += vote.effective_weight();
        }
        let mut tallies: Vec<NomineeTally> = sums
            .into_iter()
            .map(|(nominee_id, vote_count)| NomineeTally {
                nominee_id,
                vote_count,
            })
            .collect();
        tallies.sort_by(|a, b| b.vote_count.cmp(&a.vote_count));
        tallies.truncate(limit as usize);
        Ok(tallies)
    }
}

// ── MockRecipientRepo ────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockRecipientRepo {
    pub recipients: Arc<Mutex<Vec<Recipient>>>,
    /// Every token reports as taken.
    pub saturated: bool,
    /// Number of `token_exists` lookups made.
    pub token_checks: Arc<Mutex<usize>>,
    /// Inserts still to be rejected as if the unique index fired.
    pub insert_rejections: Arc<Mutex<usize>>,
}

impl MockRecipientRepo {
    pub fn new(recipients: Vec<Recipient>) -> Self {
        Self {
            recipients: Arc::new(Mutex::new(recipients)),
            ..Self::default()
        }
    }

    pub fn saturated() -> Self {
        Self {
            saturated: true,
            ..Self::default()
        }
    }

    /// The first `n` inserts lose to a concurrent writer.
    pub fn rejecting_inserts(n: usize) -> Self {
        Self {
            insert_rejections: Arc::new(Mutex::new(n)),
            ..Self::default()
        }
    }

    pub fn token_checks(&self) -> usize {
        *self.token_checks.lock().unwrap()
    }
}

impl RecipientRepository for MockRecipientRepo {
    async fn token_exists(&self, token: &str) -> Result<bool, EventsServiceError> {
        *self.token_checks.lock().unwrap() += 1;
        Ok(self.saturated || self.recipients.lock().unwrap().iter().any(|r| r.token == token))
    }

    async fn insert(&self, recipient: &Recipient) -> Result<bool, EventsServiceError> {
        {
            let mut remaining = self.insert_rejections.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Ok(false);
            }
        }
        let mut recipients = self.recipients.lock().unwrap();
        if recipients.iter().any(|r| r.token == recipient.token) {
            return Ok(false);
        }
        recipients.push(recipient.clone());
        Ok(true)
    }

    async fn list_by_award_event(
        &self,
        award_event_id: Uuid,
    ) -> Result<Vec<Recipient>, EventsServiceError> {
        Ok(self
            .recipients
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.award_event_id == award_event_id)
            .cloned()
            .collect())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Recipient>, EventsServiceError> {
        Ok(self
            .recipients
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.token == token)
            .cloned())
    }

    async fn mark_redeemed(&self, id: Uuid, at: DateTime<Utc>) -> Result<bool, EventsServiceError> {
        let mut recipients = self.recipients.lock().unwrap();
        match recipients
            .iter_mut()
            .find(|r| r.id == id && r.status == RecipientStatus::Generated)
        {
            Some(r) => {
                r.status = RecipientStatus::Redeemed;
                r.redeemed_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockOtpRepo {
    pub otps: Arc<Mutex<Vec<Otp>>>,
    /// Makes `replace_for_phone` fail.
    pub fail_writes: bool,
}

impl MockOtpRepo {
    pub fn new(otps: Vec<Otp>) -> Self {
        Self {
            otps: Arc::new(Mutex::new(otps)),
            fail_writes: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn otps_handle(&self) -> Arc<Mutex<Vec<Otp>>> {
        Arc::clone(&self.otps)
    }
}

impl OtpRepository for MockOtpRepo {
    async fn replace_for_phone(&self, otp: &Otp) -> Result<(), EventsServiceError> {
        if self.fail_writes {
            return Err(EventsServiceError::Internal(anyhow::anyhow!(
                "connection reset"
            )));
        }
        let mut otps = self.otps.lock().unwrap();
        otps.retain(|o| o.phone != otp.phone);
        otps.push(otp.clone());
        Ok(())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Otp>, EventsServiceError> {
        Ok(self
            .otps
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.phone == phone)
            .cloned())
    }

    async fn mark_verified(&self, id: Uuid) -> Result<bool, EventsServiceError> {
        let mut otps = self.otps.lock().unwrap();
        match otps.iter_mut().find(|o| o.id == id && !o.verified) {
            Some(o) => {
                o.verified = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockThrottle ─────────────────────────────────────────────────────────────

/// Cooldown windows never expire within a test.
#[derive(Clone, Default)]
pub struct MockThrottle {
    pub open: Arc<Mutex<HashSet<String>>>,
}

impl OtpThrottle for MockThrottle {
    async fn try_acquire(&self, phone: &str, _ttl_secs: u64) -> Result<bool, EventsServiceError> {
        Ok(self.open.lock().unwrap().insert(phone.to_owned()))
    }

    async fn release(&self, phone: &str) -> Result<(), EventsServiceError> {
        self.open.lock().unwrap().remove(phone);
        Ok(())
    }
}

// ── MockSms ──────────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockSms {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: bool,
}

impl MockSms {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl SmsSender for MockSms {
    async fn send(&self, phone: &str, body: &str) -> Result<(), EventsServiceError> {
        if self.fail {
            return Err(gateway_down());
        }
        self.sent
            .lock()
            .unwrap()
            .push((phone.to_owned(), body.to_owned()));
        Ok(())
    }
}
