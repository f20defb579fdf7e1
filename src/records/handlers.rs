use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument};

use crate::{
    auth::session::SessionUser,
    error::ApiError,
    records::{
        dto::{SubmitRecordRequest, SubmitRecordResponse},
        repo::{self, VerificationRecord},
    },
    state::AppState,
};

pub fn write_routes() -> Router<AppState> {
    Router::new().route("/records", post(submit))
}

#[instrument(skip(state, payload), fields(spoc = %user.username))]
pub async fn submit(
    State(state): State<AppState>,
    user: SessionUser,
    Json(payload): Json<SubmitRecordRequest>,
) -> Result<Json<SubmitRecordResponse>, ApiError> {
    let record = VerificationRecord {
        spoc_name: user.username.clone(),
        touch_method: payload.touch_method,
        student_name: payload.student_name,
        cmis_id: payload.cmis_id,
        contact_number: payload.contact_number,
        contactable: payload.contactable,
        retention_status: payload.retention_status,
        months_working: payload.months_working,
        current_company: payload.current_company,
        current_salary: payload.current_salary,
        current_designation: payload.current_designation,
        doj: payload.doj,
        reason_leaving: payload.reason_leaving,
        need_job: payload.need_job,
        nps: payload.nps,
        verification_date: payload.verification_date,
        remarks: payload.remarks,
        remarks_1: payload.remarks_1,
        remarks_3: payload.remarks_3,
    };

    repo::append(state.sheets.as_ref(), record)
        .await
        .map_err(ApiError::StoreWrite)?;

    info!(spoc = %user.username, "verification record submitted");
    Ok(Json(SubmitRecordResponse {
        spoc_name: user.username,
        message: "Data successfully submitted.".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::{MemorySheets, SheetStore, Tab};
    use std::sync::Arc;

    fn state_with_sheets() -> (AppState, Arc<MemorySheets>) {
        let sheets = Arc::new(MemorySheets::new());
        let state = AppState::fake();
        let state = AppState::from_parts(sheets.clone() as Arc<dyn SheetStore>, state.config);
        (state, sheets)
    }

    fn empty_request() -> SubmitRecordRequest {
        serde_json::from_str("{}").expect("all fields default")
    }

    #[tokio::test]
    async fn submit_injects_the_session_identity() {
        let (state, sheets) = state_with_sheets();
        let token = state.sessions.create("alice");

        let Json(resp) = submit(
            State(state.clone()),
            SessionUser {
                token,
                username: "alice".into(),
            },
            Json(empty_request()),
        )
        .await
        .expect("submit");

        assert_eq!(resp.spoc_name, "alice");
        let rows = sheets.rows(Tab::Records);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "alice");
        assert_eq!(rows[1].len(), 19);
    }

    #[tokio::test]
    async fn body_cannot_override_the_spoc_name() {
        let (state, sheets) = state_with_sheets();
        let token = state.sessions.create("alice");

        // An extra spoc_name key in the body is simply not part of the DTO.
        let payload: SubmitRecordRequest =
            serde_json::from_str(r#"{"spoc_name": "mallory", "student_name": "Ravi"}"#).unwrap();

        submit(
            State(state.clone()),
            SessionUser {
                token,
                username: "alice".into(),
            },
            Json(payload),
        )
        .await
        .expect("submit");

        let rows = sheets.rows(Tab::Records);
        assert_eq!(rows[1][0], "alice");
        assert_eq!(rows[1][2], "Ravi");
    }

    #[tokio::test]
    async fn duplicate_submissions_both_land() {
        let (state, sheets) = state_with_sheets();
        let token = state.sessions.create("alice");
        let user = || SessionUser {
            token,
            username: "alice".into(),
        };

        submit(State(state.clone()), user(), Json(empty_request()))
            .await
            .unwrap();
        submit(State(state.clone()), user(), Json(empty_request()))
            .await
            .unwrap();

        assert_eq!(sheets.rows(Tab::Records).len(), 3);
    }
}
