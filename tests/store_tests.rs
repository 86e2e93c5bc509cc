use student_portal::config::StoreConfig;
use student_portal::store::{RecordStore, Student, StudyProgramCatalog};
use student_portal::PortalError;

fn default_store() -> RecordStore {
    RecordStore::with_defaults(&StoreConfig::default())
}

#[tokio::test]
async fn test_login_success_reports_program_name() {
    let store = default_store();

    let msg = store.authenticate("A12345", "Aditira").await.unwrap();

    assert!(msg.contains("Aditira"));
    assert!(msg.contains("Teknik Informatika"));
    assert_eq!(store.failed_attempts("A12345").await, 0);
}

#[tokio::test]
async fn test_wrong_name_and_unknown_id_fail_identically() {
    let store = default_store();

    let wrong_name = store.authenticate("A12345", "WrongName").await.unwrap_err();
    let unknown_id = store.authenticate("Z99999", "Aditira").await.unwrap_err();

    assert!(matches!(wrong_name, PortalError::AuthenticationFailed));
    assert!(matches!(unknown_id, PortalError::AuthenticationFailed));
    assert_eq!(wrong_name.to_string(), unknown_id.to_string());
    assert_eq!(store.failed_attempts("A12345").await, 1);
    assert_eq!(store.failed_attempts("Z99999").await, 1);
}

#[tokio::test]
async fn test_lockout_after_three_failures() {
    let store = default_store();

    for _ in 0..3 {
        assert!(matches!(
            store.authenticate("A12345", "WrongName").await,
            Err(PortalError::AuthenticationFailed)
        ));
    }

    // Correct credentials no longer help
    assert!(matches!(
        store.authenticate("A12345", "Aditira").await,
        Err(PortalError::LockedOut(id)) if id == "A12345"
    ));
    // Locked attempts are not counted further
    assert_eq!(store.failed_attempts("A12345").await, 3);
}

#[tokio::test]
async fn test_success_resets_counter_before_lockout() {
    let store = default_store();

    store.authenticate("B21313", "Nope").await.unwrap_err();
    store.authenticate("B21313", "Nope").await.unwrap_err();
    store.authenticate("B21313", "Dito").await.unwrap();
    assert_eq!(store.failed_attempts("B21313").await, 0);

    // Two more failures are again below the threshold
    store.authenticate("B21313", "Nope").await.unwrap_err();
    store.authenticate("B21313", "Nope").await.unwrap_err();
    assert!(store.authenticate("B21313", "Dito").await.is_ok());
}

#[tokio::test]
async fn test_unknown_ids_can_be_locked_out() {
    let store = default_store();

    for _ in 0..3 {
        store.authenticate("GHOST", "Nobody").await.unwrap_err();
    }

    assert!(matches!(
        store.authenticate("GHOST", "Nobody").await,
        Err(PortalError::LockedOut(_))
    ));
    // Other ids are unaffected
    assert!(store.authenticate("A34555", "Afis").await.is_ok());
}

#[tokio::test]
async fn test_configurable_lockout_threshold() {
    let store = RecordStore::with_defaults(&StoreConfig {
        max_login_attempts: 1,
    });

    store.authenticate("A12345", "WrongName").await.unwrap_err();

    assert!(matches!(
        store.authenticate("A12345", "Aditira").await,
        Err(PortalError::LockedOut(_))
    ));
}

#[tokio::test]
async fn test_register_appends_in_order() {
    let store = default_store();

    let msg = store.register("C11111", "Citra", "SI").await.unwrap();
    assert!(msg.contains("Citra"));
    store.register("C22222", "Dewi", "TK").await.unwrap();

    let students = store.list().await;
    assert_eq!(students.len(), 5);
    assert_eq!(students[3], Student::new("C11111", "Citra", "SI"));
    assert_eq!(students[4], Student::new("C22222", "Dewi", "TK"));
}

#[tokio::test]
async fn test_register_rejects_unknown_program() {
    let store = default_store();

    let err = store
        .register("Z00000", "New Student", "XX")
        .await
        .unwrap_err();

    assert!(matches!(err, PortalError::UnknownProgram(code) if code == "XX"));
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn test_register_rejects_duplicate_id() {
    let store = default_store();

    let err = store.register("A12345", "Other", "SI").await.unwrap_err();

    assert!(matches!(err, PortalError::DuplicateId(id) if id == "A12345"));
    assert_eq!(store.len().await, 3);
}

#[tokio::test]
async fn test_register_rejects_empty_fields() {
    let store = default_store();

    for (id, name, program) in [("", "N", "TI"), ("X1", "", "TI"), ("X1", "N", "")] {
        assert!(matches!(
            store.register(id, name, program).await,
            Err(PortalError::InvalidInput(_))
        ));
    }
    assert_eq!(store.len().await, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registration_of_same_id_admits_one() {
    let store = RecordStore::new(StudyProgramCatalog::defaults(), &StoreConfig::default());

    let mut handles = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.register("SAME", &format!("Racer {}", i), "TI").await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(store.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_disjoint_registrations_all_land() {
    let store = RecordStore::new(StudyProgramCatalog::defaults(), &StoreConfig::default());

    let mut handles = Vec::new();
    for i in 0..50 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store
                .register(&format!("ID{:03}", i), "Student", "MI")
                .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(store.len().await, 50);
}

#[tokio::test]
async fn test_modify_changes_first_match_only() {
    let store = default_store();
    store.register("D00001", "Dito", "SI").await.unwrap();

    let modifier = store.change_program("SI");
    store.modify("Dito", modifier).await.unwrap();

    let students = store.list().await;
    assert_eq!(students[1], Student::new("B21313", "Dito", "SI"));
    assert_eq!(students[0], Student::new("A12345", "Aditira", "TI"));
    assert_eq!(students[2], Student::new("A34555", "Afis", "MI"));
    // Second "Dito" untouched
    assert_eq!(students[3], Student::new("D00001", "Dito", "SI"));
}

#[tokio::test]
async fn test_modify_unknown_name() {
    let store = default_store();

    let modifier = store.change_program("TI");
    let err = store.modify("Nobody", modifier).await.unwrap_err();

    assert!(matches!(err, PortalError::NotFound(name) if name == "Nobody"));
}

#[tokio::test]
async fn test_modify_with_invalid_program_propagates_error() {
    let store = default_store();

    let modifier = store.change_program("XX");
    let err = store.modify("Afis", modifier).await.unwrap_err();

    assert!(matches!(err, PortalError::UnknownProgram(_)));
    assert_eq!(store.list().await[2].study_program, "MI");
}

#[tokio::test]
async fn test_custom_modifier() {
    let store = default_store();

    store
        .modify(
            "Aditira",
            Box::new(|s: &mut Student| {
                s.name = "Aditira P".to_string();
                Ok(())
            }),
        )
        .await
        .unwrap();

    let students = store.list().await;
    assert_eq!(students[0].name, "Aditira P");
    assert!(store.authenticate("A12345", "Aditira P").await.is_ok());
}

#[tokio::test]
async fn test_list_is_a_snapshot() {
    let store = default_store();

    let mut snapshot = store.list().await;
    snapshot[0].name = "Mutated".to_string();
    snapshot.clear();

    assert_eq!(store.list().await[0].name, "Aditira");
}
