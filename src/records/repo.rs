use crate::sheets::{SheetStore, Tab};

/// One student-verification entry. The record tab has exactly these 19
/// columns, in this order; the row is append-only and carries no id, so
/// duplicates are possible and allowed.
#[derive(Debug, Clone)]
pub struct VerificationRecord {
    pub spoc_name: String,
    pub touch_method: String,
    pub student_name: String,
    pub cmis_id: String,
    pub contact_number: String,
    pub contactable: String,
    pub retention_status: String,
    pub months_working: u32,
    pub current_company: String,
    pub current_salary: String,
    pub current_designation: String,
    pub doj: String,
    pub reason_leaving: String,
    pub need_job: String,
    pub nps: u8,
    pub verification_date: String,
    pub remarks: String,
    pub remarks_1: String,
    pub remarks_3: String,
}

pub fn header_row() -> Vec<String> {
    [
        "spoc_name",
        "touch_method",
        "student_name",
        "cmis_id",
        "contact_number",
        "contactable",
        "retention_status",
        "months_working",
        "current_company",
        "current_salary",
        "current_designation",
        "doj",
        "reason_leaving",
        "need_job",
        "nps",
        "verification_date",
        "remarks",
        "remarks_1",
        "remarks_3",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl VerificationRecord {
    /// The row as the sheet stores it. Field order here is the column schema;
    /// do not reorder.
    pub fn into_row(self) -> Vec<String> {
        vec![
            self.spoc_name,
            self.touch_method,
            self.student_name,
            self.cmis_id,
            self.contact_number,
            self.contactable,
            self.retention_status,
            self.months_working.to_string(),
            self.current_company,
            self.current_salary,
            self.current_designation,
            self.doj,
            self.reason_leaving,
            self.need_job,
            self.nps.to_string(),
            self.verification_date,
            self.remarks,
            self.remarks_1,
            self.remarks_3,
        ]
    }
}

pub async fn append(sheets: &dyn SheetStore, record: VerificationRecord) -> anyhow::Result<()> {
    sheets.append_row(Tab::Records, record.into_row()).await
}
