use std::collections::{HashMap, HashSet};

use chrono::Utc;
use rand::RngExt;
use serde_json::{Map, Value};
use uuid::Uuid;

use ovation_domain::ticket::{RecipientToken, TOKEN_CHARSET, TOKEN_SUFFIX_LEN, TicketTier};

use crate::domain::repository::{AwardEventRepository, RecipientRepository};
use crate::domain::types::{ImportReport, Recipient, RecipientStatus, TOKEN_MAX_ATTEMPTS};
use crate::error::EventsServiceError;

/// One spreadsheet row as parsed upstream: column header → cell.
pub type ImportRow = Map<String, Value>;

const NAME_HEADER: &str = "name";
const FOLLOWER_COUNT_HEADER: &str = "followercount";

/// Lower-case a column header and drop spaces, underscores and hyphens.
pub fn normalize_header(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    FollowerCount,
}

/// Every distinct raw header seen in the import, classified once.
#[derive(Debug, Default)]
pub struct HeaderMapping {
    columns: HashMap<String, Column>,
}

impl HeaderMapping {
    pub fn resolve(rows: &[ImportRow]) -> Self {
        let mut columns = HashMap::new();
        for key in rows.iter().flat_map(Map::keys) {
            if columns.contains_key(key) {
                continue;
            }
            let column = match normalize_header(key).as_str() {
                NAME_HEADER => Column::Name,
                FOLLOWER_COUNT_HEADER => Column::FollowerCount,
                _ => continue,
            };
            columns.insert(key.clone(), column);
        }
        Self { columns }
    }

    pub fn column(&self, raw: &str) -> Option<Column> {
        self.columns.get(raw).copied()
    }

    /// Cells of `row` whose header maps to `column`, in key order.
    fn cells<'a>(&'a self, row: &'a ImportRow, column: Column) -> impl Iterator<Item = &'a Value> {
        row.iter()
            .filter(move |(key, _)| self.column(key) == Some(column))
            .map(|(_, cell)| cell)
    }

    /// First non-blank name cell of the row.
    fn name(&self, row: &ImportRow) -> Option<String> {
        self.cells(row, Column::Name).find_map(|cell| {
            let text = match cell {
                Value::String(s) => s.trim().to_owned(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            (!text.is_empty()).then_some(text)
        })
    }

    fn follower_count(&self, row: &ImportRow) -> i64 {
        self.cells(row, Column::FollowerCount)
            .find(|cell| match cell {
                Value::Null => false,
                Value::String(s) => !s.trim().is_empty(),
                _ => true,
            })
            .map_or(0, parse_follower_count)
    }
}

/// Numbers as-is, strings with optional thousands separators; anything else
/// is 0. Negative counts clamp to 0.
pub fn parse_follower_count(cell: &Value) -> i64 {
    let count = match cell {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let digits = s.trim().replace(',', "");
            digits
                .parse::<i64>()
                .ok()
                .or_else(|| digits.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    };
    count.unwrap_or(0).max(0)
}

fn generate_token(tier: TicketTier) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..TOKEN_SUFFIX_LEN)
        .map(|_| TOKEN_CHARSET[rng.random_range(0..TOKEN_CHARSET.len())] as char)
        .collect();
    format!("{}-{suffix}", tier.prefix())
}

// ── ImportRecipients ─────────────────────────────────────────────────────────

pub struct ImportRecipientsUseCase<W, R>
where
    W: AwardEventRepository,
    R: RecipientRepository,
{
    pub award_events: W,
    pub recipients: R,
}

impl<W, R> ImportRecipientsUseCase<W, R>
where
    W: AwardEventRepository,
    R: RecipientRepository,
{
    /// Rows are processed in order. A candidate token is rejected when it was
    /// already issued in this batch, already exists in the store, or loses
    /// the insert to the unique index; each rejection costs one attempt.
    pub async fn execute(
        &self,
        award_event_id: Uuid,
        rows: Vec<ImportRow>,
    ) -> Result<ImportReport, EventsServiceError> {
        self.award_events
            .find_by_id(award_event_id)
            .await?
            .ok_or(EventsServiceError::AwardEventNotFound)?;

        let mapping = HeaderMapping::resolve(&rows);
        let mut issued: HashSet<String> = HashSet::with_capacity(rows.len());
        let mut report = ImportReport::default();

        for (index, row) in rows.iter().enumerate() {
            let Some(name) = mapping.name(row) else {
                continue;
            };
            let follower_count = mapping.follower_count(row);
            let tier = TicketTier::classify(follower_count);

            let mut placed = false;
            for _ in 0..TOKEN_MAX_ATTEMPTS {
                let token = generate_token(tier);
                if issued.contains(&token) || self.recipients.token_exists(&token).await? {
                    continue;
                }
                issued.insert(token.clone());

                let recipient = Recipient {
                    id: Uuid::now_v7(),
                    award_event_id,
                    name: name.clone(),
                    follower_count,
                    token,
                    status: RecipientStatus::Generated,
                    redeemed_at: None,
                    created_at: Utc::now(),
                };
                if self.recipients.insert(&recipient).await? {
                    placed = true;
                    break;
                }
            }

            if placed {
                report.imported += 1;
            } else {
                report.skipped += 1;
                tracing::warn!(
                    award_event_id = %award_event_id,
                    row = index,
                    "no unique token after {TOKEN_MAX_ATTEMPTS} attempts; row skipped"
                );
            }
        }

        tracing::info!(
            award_event_id = %award_event_id,
            imported = report.imported,
            skipped = report.skipped,
            "recipients imported"
        );
        Ok(report)
    }
}

// ── ListRecipients ───────────────────────────────────────────────────────────

pub struct ListRecipientsUseCase<W, R>
where
    W: AwardEventRepository,
    R: RecipientRepository,
{
    pub award_events: W,
    pub recipients: R,
}

impl<W, R> ListRecipientsUseCase<W, R>
where
    W: AwardEventRepository,
    R: RecipientRepository,
{
    pub async fn execute(&self, award_event_id: Uuid) -> Result<Vec<Recipient>, EventsServiceError> {
        self.award_events
            .find_by_id(award_event_id)
            .await?
            .ok_or(EventsServiceError::AwardEventNotFound)?;
        self.recipients.list_by_award_event(award_event_id).await
    }
}

// ── RedeemRecipient ──────────────────────────────────────────────────────────

pub struct RedeemRecipientUseCase<R: RecipientRepository> {
    pub recipients: R,
}

impl<R: RecipientRepository> RedeemRecipientUseCase<R> {
    pub async fn execute(&self, raw_token: &str) -> Result<Recipient, EventsServiceError> {
        let token = RecipientToken::parse(raw_token)?;
        let mut recipient = self
            .recipients
            .find_by_token(token.as_str())
            .await?
            .ok_or(EventsServiceError::RecipientNotFound)?;
        if recipient.status == RecipientStatus::Redeemed {
            return Err(EventsServiceError::AlreadyRedeemed);
        }

        let now = Utc::now();
        if !self.recipients.mark_redeemed(recipient.id, now).await? {
            return Err(EventsServiceError::AlreadyRedeemed);
        }
        recipient.status = RecipientStatus::Redeemed;
        recipient.redeemed_at = Some(now);
        tracing::info!(recipient_id = %recipient.id, tier = ?token.tier(), "recipient token redeemed");
        Ok(recipient)
    }
}
