use classroom_server::domain::{Classroom, Player};
use classroom_server::errors::domain::{ConflictKind, DomainError, NotFoundKind};
use classroom_server::services::classrooms::MAX_CODE_ATTEMPTS;
use classroom_server::services::ClassroomService;
use classroom_server::SessionStore;

fn alice() -> Player {
    Player::new("p1", "Alice")
}

fn bob() -> Player {
    Player::new("p2", "Bob")
}

#[test]
fn generated_code_skips_taken_codes() {
    let store = SessionStore::new();
    let service = ClassroomService::new();
    service
        .create(&store, Some("111111"), alice())
        .expect("seed classroom");

    let mut candidates = vec!["222222", "111111"];
    let classroom = service
        .create_with(&store, None, bob(), || {
            candidates.pop().unwrap_or("999999").to_string()
        })
        .expect("create with retry");

    assert_eq!(classroom.code, "222222");
    assert_eq!(classroom.players, vec![bob()]);
    assert_eq!(store.classroom_count(), 2);
}

#[test]
fn generation_gives_up_after_bounded_attempts() {
    let store = SessionStore::new();
    let service = ClassroomService::new();
    service
        .create(&store, Some("333333"), alice())
        .expect("seed classroom");

    let mut calls = 0;
    let err = service
        .create_with(&store, None, bob(), || {
            calls += 1;
            "333333".to_string()
        })
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::ClassroomCode, _)
    ));
    assert_eq!(calls, MAX_CODE_ATTEMPTS);
    assert_eq!(store.classroom("333333").map(|c| c.players), Some(vec![alice()]));
}

#[test]
fn client_code_is_trimmed_and_never_retried() {
    let store = SessionStore::new();
    let service = ClassroomService::new();

    let classroom = service
        .create(&store, Some(" 482913 "), alice())
        .expect("create");
    assert_eq!(classroom.code, "482913");

    let err = service
        .create_with(&store, Some("482913"), bob(), || {
            panic!("client codes are not regenerated")
        })
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::ClassroomCode, _)
    ));
}

#[test]
fn recreating_after_reap_starts_an_empty_board() {
    let store = SessionStore::new();
    let service = ClassroomService::new();
    service.create(&store, Some("444444"), alice()).unwrap();
    service.leave(&store, "444444", "p1");

    let report = store.reap(i64::MAX / 2, std::time::Duration::from_secs(1));
    assert_eq!(report.classrooms, vec!["444444".to_string()]);

    let classroom: Classroom = service.create(&store, Some("444444"), bob()).unwrap();
    assert_eq!(classroom.players, vec![bob()]);
    assert!(store.leaderboard("444444").is_empty());
}

#[test]
fn join_keeps_insertion_order_and_ignores_duplicates() {
    let store = SessionStore::new();
    let service = ClassroomService::new();
    service.create(&store, Some("565656"), alice()).unwrap();

    service.join(&store, "565656", bob()).unwrap();
    let again = service
        .join(&store, "565656", Player::new("p2", "Bobby"))
        .unwrap();

    assert_eq!(again.players, vec![alice(), bob()]);
}

#[test]
fn lookups_on_unknown_code_are_not_found() {
    let store = SessionStore::new();
    let service = ClassroomService::new();

    let err = service.join(&store, "000000", alice()).unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound(NotFoundKind::Classroom, _)
    ));
    assert!(service.list_players(&store, "000000").is_err());

    // Leaving never fails.
    service.leave(&store, "000000", "p1");
}
