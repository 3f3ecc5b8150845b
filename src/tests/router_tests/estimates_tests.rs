use crate::db::estimates::{find_estimate_for_repair, list_estimates};
use crate::db::repairs::list_repairs;
use crate::router::handle;
use crate::tests::utils::*;

fn create_intake(db: &crate::db::connection::Database, cookie: &str) -> i64 {
    handle(
        post_as(
            "/repairs",
            cookie,
            &[
                ("first_name", "Juan"),
                ("last_name", "Pérez"),
                ("phone", "351-234 5678"),
                ("make", "Honda"),
                ("displacement", "250cc"),
                ("notes", ""),
            ],
        ),
        db,
    )
    .unwrap();
    db.with_conn(|conn| list_repairs(conn)).unwrap()[0].id
}

#[test]
fn sending_an_estimate_stores_the_snapshot_and_hands_off() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);
    let id = create_intake(&db, &cookie);
    let id_str = id.to_string();

    let resp = handle(
        post_as_touch(
            "/repairs/estimate",
            &cookie,
            &[
                ("id", &id_str),
                ("work_description", "Cambio de aceite y filtro"),
                ("labor_cost", "15000"),
                ("parts_cost", "5000"),
            ],
        ),
        &db,
    )
    .unwrap();

    assert_eq!(resp.status(), 303);
    let location = header(&resp, "Location");
    assert!(location.starts_with("https://wa.me/5493512345678?text="));

    let estimate = db
        .with_conn(|conn| find_estimate_for_repair(conn, id))
        .unwrap()
        .unwrap();
    assert_eq!(estimate.labor_cost, 15000.0);
    assert_eq!(estimate.parts_cost, 5000.0);
    assert_eq!(estimate.total, 20000.0);
    assert!(estimate.sent);
    assert!(estimate.sent_at.is_some());
    assert!(estimate.created_at.is_some());
}

#[test]
fn estimate_requires_description_and_labor_cost() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);
    let id = create_intake(&db, &cookie);
    let id_str = id.to_string();

    let mut resp = handle(
        post_as(
            "/repairs/estimate",
            &cookie,
            &[("id", &id_str), ("work_description", "Cambio de aceite")],
        ),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status(), 200);
    let body = body_string(&mut resp);
    assert!(body.contains("campos obligatorios"));
    // The typed description is echoed back.
    assert!(body.contains("Cambio de aceite"));

    assert!(db
        .with_conn(|conn| find_estimate_for_repair(conn, id))
        .unwrap()
        .is_none());
}

#[test]
fn parts_cost_defaults_to_zero() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);
    let id = create_intake(&db, &cookie);
    let id_str = id.to_string();

    handle(
        post_as(
            "/repairs/estimate",
            &cookie,
            &[
                ("id", &id_str),
                ("work_description", "Regulación de cadena"),
                ("labor_cost", "8000"),
            ],
        ),
        &db,
    )
    .unwrap();

    let estimate = db
        .with_conn(|conn| find_estimate_for_repair(conn, id))
        .unwrap()
        .unwrap();
    assert_eq!(estimate.parts_cost, 0.0);
    assert_eq!(estimate.total, 8000.0);
}

#[test]
fn one_estimate_per_repair() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);
    let id = create_intake(&db, &cookie);
    let id_str = id.to_string();

    let fields = [
        ("id", id_str.as_str()),
        ("work_description", "Cambio de aceite"),
        ("labor_cost", "15000"),
    ];
    handle(post_as("/repairs/estimate", &cookie, &fields), &db).unwrap();

    // A second submit bounces without inserting.
    let resp = handle(post_as("/repairs/estimate", &cookie, &fields), &db).unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/repairs");
    assert_eq!(db.with_conn(|conn| list_estimates(conn)).unwrap().len(), 1);

    // And the form itself is gone.
    let resp = handle(
        get_as(&format!("/repairs/estimate?id={id}"), &cookie),
        &db,
    )
    .unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(header(&resp, "Location"), "/repairs");
}

#[test]
fn estimate_total_shows_up_in_the_repair_list() {
    let db = init_test_db();
    let cookie = signed_in_cookie(&db);
    let id = create_intake(&db, &cookie);
    let id_str = id.to_string();

    handle(
        post_as(
            "/repairs/estimate",
            &cookie,
            &[
                ("id", &id_str),
                ("work_description", "Cambio de aceite"),
                ("labor_cost", "15000"),
                ("parts_cost", "5000"),
            ],
        ),
        &db,
    )
    .unwrap();

    let mut resp = handle(get_as("/repairs", &cookie), &db).unwrap();
    let body = body_string(&mut resp);
    assert!(body.contains("Presupuesto enviado"));
    assert!(body.contains("$ 20.000"));
}
