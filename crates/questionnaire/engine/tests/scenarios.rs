//! End-to-end questionnaire scenarios: sequencing, synthesis and merge
//! against a document that evolves between answers.

use questionnaire_engine::*;
use questionnaire_types::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

fn id(s: &str) -> QuestionId {
    QuestionId::new(s)
}

fn family() -> DocumentModel {
    DocumentModel {
        children: vec![
            Child {
                id: "child-1".into(),
                full_name: "Sam Doe".into(),
                is_minor: true,
                ..Default::default()
            },
            Child {
                id: "child-2".into(),
                full_name: "Alex Doe".into(),
                is_minor: false,
                ..Default::default()
            },
            Child {
                id: "child-3".into(),
                full_name: "Robin Doe".into(),
                is_minor: true,
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}

fn jane() -> GuardianAnswer {
    GuardianAnswer {
        guardian: GuardianNominee {
            full_name: "Jane Doe".into(),
            id_number: Some("8001015009087".into()),
            relationship: "sister".into(),
            phone: "0215550100".into(),
            ..Default::default()
        },
        alternate_guardian: None,
    }
}

#[test]
fn test_guardian_then_derived_trustee() {
    init_tracing();

    let catalog = QuestionCatalog::new(vec![
        QuestionDefinition::new("g1", QuestionType::GuardianAppointment, 1).required(),
        QuestionDefinition::new("t1", QuestionType::SamePersonGuardianTrustee, 2)
            .required()
            .depends_on("g1"),
    ])
    .unwrap();
    let mut session = QuestionnaireSession::new(catalog);
    let mut synthesizer = DocumentSynthesizer::with_minter(SequentialIdMinter::new("entity"));
    let mut document = family();

    assert_eq!(session.current_question().unwrap().id, id("g1"));
    session.answer(&id("g1"), jane()).unwrap();

    // Persist the guardian so the same-person rule can find it
    let update = synthesizer.synthesize(session.answers(), &document);
    document.apply(update);
    assert_eq!(document.guardians.len(), 1);
    let guardian_id = document.guardians[0].id.clone();

    assert_eq!(session.current_question().unwrap().id, id("t1"));
    session
        .answer(
            &id("t1"),
            SamePersonAnswer {
                use_same_person_for_trustee: true,
                guardian_id: Some(guardian_id.clone()),
            },
        )
        .unwrap();
    assert!(session.is_complete());
    assert_eq!(session.progress(), 100);

    let update = synthesizer.synthesize(session.answers(), &document);
    let trustees = update.trustees.clone().unwrap();
    assert_eq!(trustees.len(), 1);
    assert_eq!(trustees[0].full_name, "Jane Doe");
    assert_eq!(trustees[0].for_beneficiaries, vec!["child-1", "child-3"]);
    assert_eq!(trustees[0].guardian_id.as_deref(), Some(guardian_id.as_str()));
    assert!(trustees[0].is_guardian);

    document.apply(update);
    assert_eq!(document.trustees.len(), 1);
    assert_eq!(document.children.len(), 3);
}

#[test]
fn test_unmet_dependency_surfaces_after_answer() {
    let catalog = QuestionCatalog::new(vec![
        QuestionDefinition::new("b", QuestionType::WitnessAppointment, 1).depends_on("a"),
        QuestionDefinition::new("a", QuestionType::WitnessAppointment, 1),
    ]);
    // Equal priorities keep input order, so b would sort before its dependency
    assert!(matches!(
        catalog,
        Err(QuestionnaireError::DependencyUnsatisfiable { .. })
    ));

    let catalog = QuestionCatalog::new(vec![
        QuestionDefinition::new("a", QuestionType::WitnessAppointment, 1),
        QuestionDefinition::new("b", QuestionType::WitnessAppointment, 2).depends_on("a"),
    ])
    .unwrap();
    let mut session = QuestionnaireSession::new(catalog);

    assert_eq!(session.current_question().unwrap().id, id("a"));
    session
        .answer_current(AnswerPayload::Freeform(serde_json::json!({"witness": "Ann"})))
        .unwrap();
    assert_eq!(session.current_question().unwrap().id, id("b"));
    assert!(session.dependency_skips().is_empty());
}

#[test]
fn test_gap_detector_drives_a_session() {
    init_tracing();

    let mut document = family();
    document.guardians.push(Guardian {
        id: "g-1".into(),
        full_name: "Jane Doe".into(),
        id_number: Some("8001015009087".into()),
        ..Default::default()
    });

    let report = GapDetector::new().analyze(&document);
    assert_eq!(report.priority, ReportPriority::Critical);
    let kinds: Vec<_> = report.gaps.iter().map(|g| g.kind).collect();
    assert_eq!(kinds, vec![GapKind::Trustee, GapKind::Executor]);

    let mut session = QuestionnaireSession::new(report.catalog().unwrap());

    let same_person = session.current_question().unwrap().clone();
    assert_eq!(same_person.question_type, QuestionType::SamePersonGuardianTrustee);
    let guardian_id = same_person.context.guardian_id.clone();
    session
        .answer_current(SamePersonAnswer {
            use_same_person_for_trustee: true,
            guardian_id,
        })
        .unwrap();

    // The separate trustee question is optional once the guardian is reused
    assert_eq!(
        session.current_question().unwrap().question_type,
        QuestionType::TrusteeAppointment
    );
    assert!(session.skip());

    assert_eq!(
        session.current_question().unwrap().question_type,
        QuestionType::ExecutorAppointment
    );
    assert!(!session.skip());
    session
        .answer_current(ExecutorAnswer {
            executor: ExecutorNominee {
                full_name: "Pat Smith".into(),
                id_number: Some("7502025009081".into()),
                ..Default::default()
            },
            alternate_executor: None,
        })
        .unwrap();

    assert!(session.is_complete());
    assert!(session.current_question().is_none());

    document.apply(session.synthesize(&document));
    assert_eq!(document.trustees.len(), 1);
    assert!(document.trustees[0].is_guardian);
    assert_eq!(document.executors.len(), 1);

    let follow_up = GapDetector::new().analyze(&document);
    assert!(!follow_up.has_gaps());
}

#[test]
fn test_skipped_prerequisite_passes_over_dependent() {
    let catalog = QuestionCatalog::new(vec![
        QuestionDefinition::new("same", QuestionType::SamePersonGuardianTrustee, 1),
        QuestionDefinition::new("trustee", QuestionType::TrusteeAppointment, 2)
            .depends_on("same"),
        QuestionDefinition::new("executor", QuestionType::ExecutorAppointment, 3).required(),
    ])
    .unwrap();
    let mut session = QuestionnaireSession::new(catalog);

    assert!(session.skip());
    assert_eq!(session.current_question().unwrap().id, id("executor"));
    assert_eq!(session.dependency_skips().len(), 1);
    assert_eq!(session.dependency_skips()[0].question_id, id("trustee"));
    assert_eq!(session.progress(), 67);
}

#[test]
fn test_resume_from_persisted_state() {
    let catalog = QuestionCatalog::new(vec![
        QuestionDefinition::new("g1", QuestionType::GuardianAppointment, 1).required(),
        QuestionDefinition::new("e1", QuestionType::ExecutorAppointment, 2).required(),
    ])
    .unwrap();

    let mut session = QuestionnaireSession::new(catalog.clone());
    session.answer_current(jane()).unwrap();

    let json = serde_json::to_string(&session.snapshot()).unwrap();
    let state: SessionState = serde_json::from_str(&json).unwrap();

    let mut resumed =
        QuestionnaireSession::restore(catalog, state, SessionConfig::default()).unwrap();
    assert_eq!(resumed.current_question().unwrap().id, id("e1"));
    assert!(!resumed.is_complete());
    assert_eq!(resumed.answers()[0].data, AnswerPayload::Guardian(jane()));
}

#[test]
fn test_document_update_wire_shape() {
    let update = DocumentSynthesizer::with_minter(SequentialIdMinter::new("g"))
        .synthesize(
            &[AnswerRecord::new(
                id("g1"),
                QuestionType::GuardianAppointment,
                jane().into(),
            )],
            &DocumentModel::default(),
        );

    let json = serde_json::to_value(&update).unwrap();
    assert_eq!(json["guardians"][0]["id"], "g-1");
    assert_eq!(json["guardians"][0]["fullName"], "Jane Doe");
    assert_eq!(json["guardians"][0]["isAlternate"], false);
    assert!(json.get("trustees").is_none());
}
