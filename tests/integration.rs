//! End-to-end flows across enrichment, capture, selection and submission.
mod common;
use common::*;
use formflow::enrich::apply_enrichment;
use formflow::extract::clear_capture;
use formflow::prelude::*;

/// Registration lookup flows into the value map: both sources agree on the
/// make, the session ends up with it.
#[tokio::test]
async fn lookup_fills_the_form_from_a_registration_number() {
    let mut session = FormSession::new(appraisal_form());
    session.set_value("reg", FieldValue::text("AB12CDE"));

    let service = EnrichmentService::new(
        StaticRegistry(Ok(Some(RegistryRecord {
            make: Some("Ford".to_string()),
            ..RegistryRecord::default()
        }))),
        StaticHistory(Ok(Some(HistoryRecord {
            make: Some("Ford".to_string()),
            ..HistoryRecord::default()
        }))),
        no_hints(),
    );

    let outcome = service.lookup("AB12CDE").await.unwrap();
    apply_enrichment(&outcome.facts, &mut session);

    assert_eq!(session.value("make"), Some(&FieldValue::text("Ford")));
}

/// Pick-then-change-selection round trip over the vehicle group.
#[test]
fn selection_round_trip_leaves_no_residue() {
    let mut session = FormSession::new(appraisal_form());
    let group = SelectionGroup {
        key: "vehicle".to_string(),
        id_field: "vehicleId".to_string(),
        manual_fields: vec!["make".to_string(), "model".to_string()],
        bindings: vec![
            CandidateBinding {
                attr: CandidateAttr::Make,
                field: "make".to_string(),
            },
            CandidateBinding {
                attr: CandidateAttr::Model,
                field: "model".to_string(),
            },
        ],
    };
    let mut controller = SelectionController::new(group, &mut session);

    controller.handle(SelectionEvent::PickCandidate(ford_fiesta()), &mut session);
    assert_eq!(controller.state(), SelectionState::Selected);
    assert_eq!(session.value("vehicleId"), Some(&FieldValue::text("v1")));
    assert!(session.is_hidden("make"));

    controller.handle(SelectionEvent::ChangeSelection, &mut session);
    assert_eq!(controller.state(), SelectionState::Searching);
    assert_eq!(session.value("vehicleId"), None);
    assert_eq!(session.value("make"), None);
}

/// Two issue records, remove the first: exactly the second survives.
#[test]
fn issue_removal_is_order_correct() {
    let mut session = FormSession::new(appraisal_form());
    let issues_field = session.form().field("issues").unwrap().clone();
    let editor = IssueEditor::for_field(&issues_field).unwrap();

    editor.add(&mut session);
    editor.add(&mut session);
    editor
        .patch(&mut session, 0, IssuePatch::Description("first".to_string()))
        .unwrap();
    editor
        .patch(&mut session, 1, IssuePatch::Description("second".to_string()))
        .unwrap();

    editor.remove(&mut session, 0).unwrap();

    let records = editor.records(&session);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].description, "second");
}

/// Licence upload succeeds, OCR fails: the requirement is satisfied, no
/// extraction-keyed field changes, and the error is the extraction kind.
#[tokio::test]
async fn capture_survives_an_extraction_outage() {
    let mut session = FormSession::new(appraisal_form());
    session.set_value("reg", FieldValue::text("AB12CDE"));
    session.set_value("make", FieldValue::text("Ford"));

    let pipeline = CapturePipeline::new(
        SeqUploader::default(),
        StaticExtraction(Err(ServiceError::new("OCR offline"))),
    );
    let err = pipeline
        .capture(&mut session, "licence", photo("licence.jpg"))
        .await
        .unwrap_err();

    assert!(matches!(err, CaptureError::ExtractionFailed(_)));
    assert_eq!(session.value("holderName"), None);
    assert_eq!(session.value("licenceNumber"), None);

    // The licence requirement is met by the asset alone; the form submits.
    let endpoint = RecordingEndpoint::default();
    let mut submitter = Submitter::new(endpoint.clone());
    submitter.submit(&session).await.unwrap();
    assert_eq!(endpoint.call_count(), 1);
}

/// The full appraisal flow: enrich, capture, annotate, submit.
#[tokio::test]
async fn full_appraisal_flow_submits_a_coherent_payload() {
    let mut session = FormSession::new(appraisal_form());
    session.set_value("reg", FieldValue::text("ab12 cde"));

    // Enrichment.
    let service = EnrichmentService::new(
        StaticRegistry(Ok(Some(RegistryRecord {
            make: Some("Ford".to_string()),
            model: Some("Fiesta".to_string()),
            year_of_manufacture: Some(2019),
            ..RegistryRecord::default()
        }))),
        StaticHistory(Ok(None)),
        no_hints(),
    );
    let outcome = service.lookup(session.value("reg").unwrap().as_text().unwrap()).await.unwrap();
    apply_enrichment(&outcome.facts, &mut session);

    // Licence capture with auto-fill, then a change of mind, then recapture.
    let mut extracted = HashMap::new();
    extracted.insert("holder_name".to_string(), "JANE DOE".to_string());
    let pipeline = CapturePipeline::new(SeqUploader::default(), StaticExtraction(Ok(extracted)));
    let CaptureOutcome::Extracted(fill) = pipeline
        .capture(&mut session, "licence", photo("blurry.jpg"))
        .await
        .unwrap()
    else {
        panic!("expected extraction");
    };
    clear_capture(&mut session, fill);
    pipeline
        .capture(&mut session, "licence", photo("steady.jpg"))
        .await
        .unwrap();

    // One inspection issue with a photo.
    let issues_field = session.form().field("issues").unwrap().clone();
    let editor = IssueEditor::for_field(&issues_field).unwrap();
    editor.add(&mut session);
    editor
        .patch(&mut session, 0, IssuePatch::Category("Bodywork".to_string()))
        .unwrap();
    editor
        .patch(&mut session, 0, IssuePatch::Description("Stone chips".to_string()))
        .unwrap();
    editor
        .attach_photos(&mut session, 0, &SeqUploader::default(), vec![photo("chips.jpg")])
        .await
        .unwrap();

    // Submit.
    let endpoint = RecordingEndpoint::default();
    let mut submitter = Submitter::new(endpoint.clone());
    submitter.submit(&session).await.unwrap();
    assert_eq!(endpoint.call_count(), 1);

    let payload = assemble(&session);
    assert_eq!(payload.values["make"], serde_json::json!("Ford"));
    assert_eq!(payload.values["holderName"], serde_json::json!("JANE DOE"));
    // One licence scan plus one issue photo; the cleared capture is gone.
    assert_eq!(payload.assets.len(), 2);
    assert!(payload.assets.iter().all(|a| !a.storage_key.contains("cdn.test")));
}
