use crate::router::handle;
use crate::tests::utils::*;

#[test]
fn register_issues_a_working_session() {
    let db = init_test_db();

    let resp = handle(
        post(
            "/register",
            &[("email", "Staff@Example.com"), ("password", "secret1")],
        ),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/repairs");

    let cookie = session_cookie_from(&resp);
    let mut resp = handle(get_as("/repairs", &cookie), &db).unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp).contains("Nueva Reparación"));
}

#[test]
fn login_with_remember_persists_the_preference() {
    let db = init_test_db();
    signed_in_cookie(&db);

    let resp = handle(
        post(
            "/login",
            &[
                ("email", "staff@example.com"),
                ("password", "secret1"),
                ("remember", "true"),
            ],
        ),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);

    let cookies = set_cookies(&resp);
    assert!(cookies.iter().any(|c| c.starts_with("session=")));
    assert!(cookies
        .iter()
        .any(|c| c.starts_with("saved_email=staff@example.com")));
    assert!(cookies.iter().any(|c| c.starts_with("remember_me=true")));
}

#[test]
fn login_without_remember_clears_the_preference() {
    let db = init_test_db();
    signed_in_cookie(&db);

    let resp = handle(
        post(
            "/login",
            &[("email", "staff@example.com"), ("password", "secret1")],
        ),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);

    let cookies = set_cookies(&resp);
    let cleared = cookies
        .iter()
        .find(|c| c.starts_with("saved_email="))
        .expect("saved_email cookie missing");
    assert!(cleared.contains("Max-Age=0"));
}

#[test]
fn wrong_password_rerenders_with_inline_error() {
    let db = init_test_db();
    signed_in_cookie(&db);

    let mut resp = handle(
        post(
            "/login",
            &[("email", "staff@example.com"), ("password", "not-it")],
        ),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("Email o contraseña incorrectos"));
    // The typed email survives the round trip.
    assert!(body.contains("staff@example.com"));
}

#[test]
fn login_page_prefills_from_remember_cookies() {
    let db = init_test_db();

    let mut resp = handle(
        get_as("/login", "saved_email=staff@example.com; remember_me=true"),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("value=\"staff@example.com\""));
    assert!(body.contains("checked"));
}

#[test]
fn logout_revokes_the_session() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);

    let resp = handle(post_as("/logout", &cookie, &[]), &db).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/login");

    let resp = handle(get_as("/repairs", &cookie), &db).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/login");
}

#[test]
fn duplicate_registration_is_rejected_inline() {
    let db = init_test_db();
    signed_in_cookie(&db);

    let mut resp = handle(
        post(
            "/register",
            &[("email", "staff@example.com"), ("password", "secret1")],
        ),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(body_string(&mut resp).contains("Ya existe una cuenta"));
}
