use serde::{Deserialize, Serialize};

/// Request body for a record submission. `spoc_name` is absent on purpose:
/// the value comes from the session, never from the client. All text fields
/// default to empty; contents are free text, and the nps 0-10 bound is an
/// input-widget concern, not enforced here.
#[derive(Debug, Deserialize)]
pub struct SubmitRecordRequest {
    #[serde(default)]
    pub touch_method: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub cmis_id: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub contactable: String,
    #[serde(default)]
    pub retention_status: String,
    #[serde(default)]
    pub months_working: u32,
    #[serde(default)]
    pub current_company: String,
    #[serde(default)]
    pub current_salary: String,
    #[serde(default)]
    pub current_designation: String,
    #[serde(default)]
    pub doj: String,
    #[serde(default)]
    pub reason_leaving: String,
    #[serde(default)]
    pub need_job: String,
    #[serde(default)]
    pub nps: u8,
    #[serde(default)]
    pub verification_date: String,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub remarks_1: String,
    #[serde(default)]
    pub remarks_3: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitRecordResponse {
    pub spoc_name: String,
    pub message: String,
}
