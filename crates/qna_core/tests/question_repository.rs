use qna_core::db::open_db_in_memory;
use qna_core::{
    FlushOutcome, Question, QuestionListQuery, QuestionRepository, RepoError,
    SqliteQuestionRepository, SqliteUserRepository, Title, User, UserRepository,
};
use rusqlite::Connection;

fn saved_writer(conn: &Connection) -> User {
    let users = SqliteUserRepository::try_new(conn).unwrap();
    users
        .save(&User::new("USER1", "123456", "LDS", "lds@test.com"))
        .unwrap()
}

fn question(title: &str) -> Question {
    Question::new(Title::new(title).unwrap(), Some("body".to_string()))
}

#[test]
fn save_and_find_roundtrip_keeps_embedded_title() {
    let conn = open_db_in_memory().unwrap();
    let writer = saved_writer(&conn);
    let questions = SqliteQuestionRepository::try_new(&conn).unwrap();

    let saved = questions.save(&question("title1").write_by(&writer)).unwrap();
    let loaded = questions.find_by_id(saved.id.unwrap(), false).unwrap().unwrap();

    assert_eq!(loaded, saved);
    assert_eq!(loaded.title, Title::new("title1").unwrap());
    assert!(loaded.is_owner(&writer));
}

#[test]
fn title_column_rejects_out_of_range_values() {
    let conn = open_db_in_memory().unwrap();
    let err = conn
        .execute(
            "INSERT INTO questions (title, created_at, updated_at) VALUES ('', 0, 0);",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("CHECK"));

    let too_long = "t".repeat(101);
    assert!(conn
        .execute(
            "INSERT INTO questions (title, created_at, updated_at) VALUES (?1, 0, 0);",
            [too_long],
        )
        .is_err());
}

#[test]
fn unknown_writer_violates_data_integrity() {
    let conn = open_db_in_memory().unwrap();
    let questions = SqliteQuestionRepository::try_new(&conn).unwrap();

    let mut orphan = question("orphan");
    orphan.writer_id = Some(42);
    let err = questions.save(&orphan).unwrap_err();
    assert!(matches!(err, RepoError::DataIntegrity(_)), "unexpected: {err}");
}

#[test]
fn soft_deleted_questions_are_hidden_by_default() {
    let conn = open_db_in_memory().unwrap();
    let questions = SqliteQuestionRepository::try_new(&conn).unwrap();

    let kept = questions.save(&question("kept")).unwrap();
    let mut removed = questions.save(&question("removed")).unwrap();
    removed.soft_delete();
    assert!(questions.flush(&removed).unwrap().is_updated());

    let active = questions.find_active().unwrap();
    assert_eq!(active.len(), 1);
    assert!(active[0].id == kept.id);

    assert!(questions.find_by_id(removed.id.unwrap(), false).unwrap().is_none());
    let tombstone = questions.find_by_id(removed.id.unwrap(), true).unwrap().unwrap();
    assert!(!tombstone.is_active());

    let all = questions
        .list(&QuestionListQuery {
            include_deleted: true,
            ..QuestionListQuery::default()
        })
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn list_filters_by_writer_and_paginates_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let writer = saved_writer(&conn);
    let questions = SqliteQuestionRepository::try_new(&conn).unwrap();

    let first = questions.save(&question("first").write_by(&writer)).unwrap();
    let second = questions.save(&question("second").write_by(&writer)).unwrap();
    questions.save(&question("anonymous")).unwrap();

    let by_writer = questions
        .list(&QuestionListQuery {
            writer_id: writer.id,
            ..QuestionListQuery::default()
        })
        .unwrap();
    let ids: Vec<_> = by_writer.iter().map(|q| q.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let page = questions
        .list(&QuestionListQuery {
            limit: Some(1),
            offset: 1,
            ..QuestionListQuery::default()
        })
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, second.id);
}

#[test]
fn changing_title_to_equal_value_is_not_a_change() {
    let conn = open_db_in_memory().unwrap();
    let questions = SqliteQuestionRepository::try_new(&conn).unwrap();

    let mut saved = questions.save(&question("same")).unwrap();
    saved.change_title(Title::new("same").unwrap());
    assert_eq!(questions.flush(&saved).unwrap(), FlushOutcome::Unchanged);

    saved.change_title(Title::new("different").unwrap());
    assert!(questions.flush(&saved).unwrap().is_updated());
    let loaded = questions.find_by_id(saved.id.unwrap(), false).unwrap().unwrap();
    assert_eq!(loaded.title.as_str(), "different");
}

#[test]
fn title_column_rejects_nul_and_every_valid_title_is_storable() {
    let conn = open_db_in_memory().unwrap();
    let questions = SqliteQuestionRepository::try_new(&conn).unwrap();

    assert!(Title::new("\0abc").is_err());
    let err = conn
        .execute(
            "INSERT INTO questions (title, created_at, updated_at) VALUES (?1, 0, 0);",
            [format!("a\0{}", "b".repeat(120))],
        )
        .unwrap_err();
    assert!(err.to_string().contains("CHECK"));

    for text in ["a".to_string(), "질".repeat(100), "t".repeat(100)] {
        let saved = questions
            .save(&Question::new(Title::new(text.clone()).unwrap(), None))
            .unwrap();
        let loaded = questions.find_by_id(saved.id.unwrap(), false).unwrap().unwrap();
        assert_eq!(loaded.title.as_str(), text);
    }
}
