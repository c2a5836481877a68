use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceLog {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub check_in_time: DateTime<Utc>,
    /// None while the study session is still open.
    pub check_out_time: Option<DateTime<Utc>>,
    /// None until the session is closed.
    pub duration_seconds: Option<i64>,
}
