use crate::db::repairs::{get_repair, list_repairs};
use crate::router::handle;
use crate::tests::utils::*;

fn intake_fields<'a>() -> Vec<(&'a str, &'a str)> {
    vec![
        ("first_name", "Juan"),
        ("last_name", "Pérez"),
        ("phone", "3512345678"),
        ("make", "Honda"),
        ("displacement", "250cc"),
        ("notes", "Hace un ruido raro al frenar"),
    ]
}

#[test]
fn unauthenticated_requests_bounce_to_login() {
    let db = init_test_db();

    for path in ["/", "/repairs", "/repairs/new", "/stats"] {
        let resp = handle(get(path), &db).unwrap();
        assert_eq!(resp.status(), 303, "path {path}");
        assert_eq!(header(&resp, "Location"), "/login", "path {path}");
    }
}

#[test]
fn intake_create_then_list_then_delete() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);

    let resp = handle(post_as("/repairs", &cookie, &intake_fields()), &db).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/repairs");

    let mut resp = handle(get_as("/repairs", &cookie), &db).unwrap();
    let body = body_string(&mut resp);
    assert!(body.contains("Juan Pérez"));
    assert!(body.contains("Honda"));
    assert!(body.contains("250cc"));
    assert!(body.contains("Hace un ruido raro al frenar"));

    let stored = db.with_conn(|conn| list_repairs(conn)).unwrap();
    assert_eq!(stored.len(), 1);
    let repair = &stored[0];
    assert!(repair.created_at.is_some());
    assert!(!repair.ready_for_pickup);
    assert!(repair.user_id.is_some());

    let id = repair.id.to_string();
    let resp = handle(post_as("/repairs/delete", &cookie, &[("id", &id)]), &db).unwrap();
    assert_eq!(resp.status(), 303);

    let mut resp = handle(get_as("/repairs", &cookie), &db).unwrap();
    assert!(body_string(&mut resp).contains("No hay reparaciones registradas"));
}

#[test]
fn missing_required_fields_rerender_the_form() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);

    let mut resp = handle(
        post_as(
            "/repairs",
            &cookie,
            &[("first_name", "Juan"), ("last_name", "Pérez")],
        ),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("campos obligatorios"));
    // Typed values are echoed back.
    assert!(body.contains("value=\"Juan\""));

    assert!(db.with_conn(|conn| list_repairs(conn)).unwrap().is_empty());
}

#[test]
fn private_notes_round_trip() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);

    handle(post_as("/repairs", &cookie, &intake_fields()), &db).unwrap();
    let id = db.with_conn(|conn| list_repairs(conn)).unwrap()[0].id;
    let id_str = id.to_string();

    let resp = handle(
        post_as(
            "/repairs/notes",
            &cookie,
            &[("id", &id_str), ("private_notes", "Cliente habitual, cobrar con descuento")],
        ),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);

    let repair = db.with_conn(|conn| get_repair(conn, id)).unwrap().unwrap();
    assert_eq!(
        repair.private_notes.as_deref(),
        Some("Cliente habitual, cobrar con descuento")
    );

    let mut resp = handle(get_as(&format!("/repairs/notes?id={id}"), &cookie), &db).unwrap();
    assert!(body_string(&mut resp).contains("Cliente habitual"));

    // Saving an empty body clears them.
    let resp = handle(
        post_as(
            "/repairs/notes",
            &cookie,
            &[("id", &id_str), ("private_notes", "  ")],
        ),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);
    let repair = db.with_conn(|conn| get_repair(conn, id)).unwrap().unwrap();
    assert_eq!(repair.private_notes, None);
}

#[test]
fn marking_ready_sets_flag_and_timestamp_together() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);

    handle(post_as("/repairs", &cookie, &intake_fields()), &db).unwrap();
    let id = db.with_conn(|conn| list_repairs(conn)).unwrap()[0].id;
    let id_str = id.to_string();

    let resp = handle(
        post_as_touch("/repairs/ready", &cookie, &[("id", &id_str)]),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);
    let location = header(&resp, "Location");
    assert!(location.starts_with("https://wa.me/5493512345678?text="));

    let repair = db.with_conn(|conn| get_repair(conn, id)).unwrap().unwrap();
    assert!(repair.ready_for_pickup);
    assert!(repair.pickup_notified_at.is_some());
}

#[test]
fn ready_on_desktop_renders_the_handoff_page() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);

    handle(post_as("/repairs", &cookie, &intake_fields()), &db).unwrap();
    let id = db.with_conn(|conn| list_repairs(conn)).unwrap()[0].id.to_string();

    let mut resp = handle(post_as("/repairs/ready", &cookie, &[("id", &id)]), &db).unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("wa.me/5493512345678"));
    assert!(body.contains("Abrir WhatsApp"));
}

#[test]
fn deleting_an_unknown_repair_is_a_not_found() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);

    let result = handle(post_as("/repairs/delete", &cookie, &[("id", "4242")]), &db);
    assert!(matches!(result, Err(crate::errors::ServerError::NotFound)));
}
