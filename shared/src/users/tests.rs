use super::*;
use crate::protocol::HttpMethod;
use crate::testing::{DisposableState, FakeServer};
use std::cell::RefCell;
use std::rc::Rc;

// =========================================================
// Shared Setup
// =========================================================

type Controller = UsersController<FakeServer, DisposableState<UsersState>>;

fn setup() -> (FakeServer, Controller) {
    let server = FakeServer::new();
    server.seed_user("a-1", "root", Role::Admin);
    server.seed_user("a-2", "ops", Role::Admin);
    server.seed_user("u-1", "alice", Role::User);
    server.seed_user("u-2", "bob", Role::User);

    let api = UserDeskApi::new(server.clone(), "http://desk.local").with_token("tok");
    let ctrl = UsersController::new(api, DisposableState::new());
    (server, ctrl)
}

fn usernames(ctrl: &Controller) -> Vec<String> {
    ctrl.state
        .peek(|s| s.users.iter().map(|u| u.username.clone()).collect())
}

fn user(ctrl: &Controller, uuid: &str) -> User {
    ctrl.state
        .peek(|s| s.users.iter().find(|u| u.uuid == uuid).cloned())
        .unwrap()
}

/// 在 DELETE 请求到达服务端时记录本地集合
fn snapshot_on_delete(server: &FakeServer, ctrl: &Controller) -> Rc<RefCell<Option<Vec<String>>>> {
    let seen = Rc::new(RefCell::new(None));
    let state = ctrl.state.clone();
    let slot = seen.clone();
    server.on_send(move |req| {
        if req.method == HttpMethod::Delete {
            let names: Vec<String> = state.peek(|s| s.users.iter().map(|u| u.username.clone()).collect());
            *slot.borrow_mut() = Some(names);
        }
    });
    seen
}

// =========================================================
// List
// =========================================================

#[tokio::test]
async fn test_refresh_replaces_collection() {
    let (_server, ctrl) = setup();
    ctrl.state.peek(|s| assert!(s.loading));

    ctrl.refresh().await;

    assert_eq!(usernames(&ctrl), vec!["root", "ops", "alice", "bob"]);
    ctrl.state.peek(|s| {
        assert!(!s.loading);
        assert_eq!(s.error, None);
    });
}

#[tokio::test]
async fn test_refresh_failure_empties_collection() {
    let (server, ctrl) = setup();
    ctrl.refresh().await;
    assert_eq!(usernames(&ctrl).len(), 4);

    server.fail_next(HttpMethod::Get, 403, r#"{"message":"Admin privileges required."}"#);
    ctrl.refresh().await;

    assert!(usernames(&ctrl).is_empty());
    ctrl.state.peek(|s| {
        // 列表失败总是固定文案
        assert_eq!(s.error.as_deref(), Some(FETCH_USERS_FAILED));
        assert!(!s.loading);
    });
}

#[tokio::test]
async fn test_refresh_network_error_is_page_error() {
    let (server, ctrl) = setup();
    server.set_offline(true);
    ctrl.refresh().await;
    ctrl.state
        .peek(|s| assert_eq!(s.error.as_deref(), Some(FETCH_USERS_FAILED)));
}

#[tokio::test]
async fn test_refresh_result_discarded_after_unmount() {
    let (server, ctrl) = setup();
    let state = ctrl.state.clone();
    server.on_send(move |_| state.dispose());

    ctrl.refresh().await;

    ctrl.state.peek(|s| {
        assert!(s.users.is_empty());
        assert!(s.loading);
    });
}

#[tokio::test]
async fn test_stale_refresh_is_ignored() {
    let (server, ctrl) = setup();
    // 第一次请求返回途中又发起了一次请求：模拟为在请求到达时推进序号
    let state = ctrl.state.clone();
    server.on_send(move |_| {
        state.write(|s| s.fetch_seq += 1);
    });

    ctrl.refresh().await;

    ctrl.state.peek(|s| {
        assert!(s.users.is_empty());
        assert!(s.loading);
    });
}

// =========================================================
// Dialogs
// =========================================================

#[tokio::test]
async fn test_only_one_dialog_at_a_time() {
    let (_server, ctrl) = setup();
    ctrl.refresh().await;

    assert!(ctrl.open_create());
    assert!(!ctrl.request_logout());
    assert!(!ctrl.request_delete(user(&ctrl, "u-1")));
    ctrl.state
        .peek(|s| assert!(matches!(s.dialog, Dialog::Create(_))));

    ctrl.close_dialog();
    assert!(ctrl.request_logout());
    ctrl.state.peek(|s| assert_eq!(s.dialog, Dialog::ConfirmLogout));
}

#[tokio::test]
async fn test_create_form_resets_on_reopen() {
    let (_server, ctrl) = setup();
    ctrl.open_create();
    ctrl.edit_create(|f| {
        f.username = "draft".to_string();
        f.role = Role::Admin;
    });
    ctrl.close_dialog();
    ctrl.open_create();

    ctrl.state
        .peek(|s| assert_eq!(s.dialog, Dialog::Create(CreateForm::default())));
}

// =========================================================
// Create
// =========================================================

#[tokio::test]
async fn test_create_success_closes_dialog_and_relists() {
    let (server, ctrl) = setup();
    ctrl.refresh().await;

    ctrl.open_create();
    ctrl.edit_create(|f| {
        f.username = "carol".to_string();
        f.password = "pw".to_string();
    });
    assert!(ctrl.submit_create().await);

    ctrl.state.peek(|s| {
        assert_eq!(s.dialog, Dialog::Closed);
        let carol = s.users.iter().find(|u| u.username == "carol").unwrap();
        assert_eq!(carol.role, Role::User);
    });
    assert_eq!(
        server.call_log(),
        vec!["GET /api/users", "POST /api/users", "GET /api/users"]
    );
}

#[tokio::test]
async fn test_create_failure_keeps_dialog_open_with_message() {
    let (server, ctrl) = setup();
    ctrl.refresh().await;

    ctrl.open_create();
    ctrl.edit_create(|f| {
        f.username = "alice".to_string();
        f.password = "pw".to_string();
    });
    assert!(!ctrl.submit_create().await);

    ctrl.state.peek(|s| match &s.dialog {
        Dialog::Create(form) => {
            assert_eq!(form.error.as_deref(), Some("Username already exists"));
            assert!(!form.submitting);
            assert_eq!(form.username, "alice");
        }
        other => panic!("dialog closed unexpectedly: {:?}", other),
    });
    // 失败不触发重新拉取
    assert_eq!(server.call_log(), vec!["GET /api/users", "POST /api/users"]);
}

#[tokio::test]
async fn test_create_failure_without_message_uses_fallback() {
    let (server, ctrl) = setup();
    server.fail_next(HttpMethod::Post, 500, "");

    ctrl.open_create();
    ctrl.edit_create(|f| f.username = "dave".to_string());
    ctrl.submit_create().await;

    ctrl.state.peek(|s| match &s.dialog {
        Dialog::Create(form) => assert_eq!(form.error.as_deref(), Some(CREATE_USER_FAILED)),
        other => panic!("unexpected dialog: {:?}", other),
    });
}

#[tokio::test]
async fn test_create_ignored_while_submitting() {
    let (server, ctrl) = setup();
    ctrl.open_create();
    ctrl.edit_create(|f| f.submitting = true);

    assert!(!ctrl.submit_create().await);
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_create_in_flight_cannot_be_closed_or_replaced() {
    let (server, ctrl) = setup();
    ctrl.refresh().await;
    server.fail_next(HttpMethod::Post, 409, r#"{"message":"Username already exists"}"#);

    ctrl.open_create();
    ctrl.edit_create(|f| {
        f.username = "alice".to_string();
        f.password = "pw".to_string();
    });

    // POST 到达服务端时尝试关闭并重新打开对话框
    let state = ctrl.state.clone();
    let other = ctrl.clone();
    let checked = Rc::new(RefCell::new(false));
    let flag = checked.clone();
    server.on_send(move |req| {
        if req.method == HttpMethod::Post {
            other.close_dialog();
            assert!(!other.open_create());
            state.peek(|s| match &s.dialog {
                Dialog::Create(form) => {
                    assert!(form.submitting);
                    assert_eq!(form.username, "alice");
                }
                dialog => panic!("create dialog replaced: {:?}", dialog),
            });
            *flag.borrow_mut() = true;
        }
    });

    assert!(!ctrl.submit_create().await);
    assert!(*checked.borrow());

    // 错误落在发起请求的那份表单上
    ctrl.state.peek(|s| match &s.dialog {
        Dialog::Create(form) => {
            assert_eq!(form.username, "alice");
            assert_eq!(form.error.as_deref(), Some("Username already exists"));
            assert!(!form.submitting);
        }
        other => panic!("unexpected dialog: {:?}", other),
    });

    // 请求结束后可以正常关闭
    ctrl.close_dialog();
    ctrl.state.peek(|s| assert_eq!(s.dialog, Dialog::Closed));
}

// =========================================================
// Delete
// =========================================================

#[tokio::test]
async fn test_delete_admin_is_removed_before_server_responds() {
    let (server, ctrl) = setup();
    ctrl.refresh().await;
    let seen = snapshot_on_delete(&server, &ctrl);

    ctrl.request_delete(user(&ctrl, "a-2"));
    let outcome = ctrl.confirm_delete().await;

    assert_eq!(outcome, Some(DeleteOutcome::Resolved));
    assert_eq!(
        seen.borrow().clone().unwrap(),
        vec!["root", "alice", "bob"]
    );
    assert_eq!(usernames(&ctrl), vec!["root", "alice", "bob"]);
    // 成功后不再拉取
    assert_eq!(
        server.call_log(),
        vec!["GET /api/users", "DELETE /api/users/a-2"]
    );
    ctrl.state.peek(|s| {
        assert_eq!(s.dialog, Dialog::Closed);
        assert_eq!(s.notification, None);
    });
}

#[tokio::test]
async fn test_delete_admin_failure_restores_server_truth() {
    let (server, ctrl) = setup();
    ctrl.refresh().await;
    let seen = snapshot_on_delete(&server, &ctrl);
    server.fail_next(
        HttpMethod::Delete,
        403,
        r#"{"message":"Cannot delete the last admin."}"#,
    );

    ctrl.request_delete(user(&ctrl, "a-1"));
    let outcome = ctrl.confirm_delete().await;

    assert_eq!(outcome, Some(DeleteOutcome::Reverted));
    assert_eq!(seen.borrow().clone().unwrap(), vec!["ops", "alice", "bob"]);
    assert_eq!(usernames(&ctrl), vec!["root", "ops", "alice", "bob"]);
    ctrl.state.peek(|s| {
        assert_eq!(
            s.notification.as_deref(),
            Some("Cannot delete the last admin.")
        );
        assert_eq!(s.dialog, Dialog::Closed);
    });
}

#[tokio::test]
async fn test_delete_user_waits_for_confirmation() {
    let (server, ctrl) = setup();
    ctrl.refresh().await;
    let seen = snapshot_on_delete(&server, &ctrl);

    ctrl.request_delete(user(&ctrl, "u-1"));
    let outcome = ctrl.confirm_delete().await;

    assert_eq!(outcome, Some(DeleteOutcome::Resolved));
    // 请求期间本地集合保持不变
    assert_eq!(
        seen.borrow().clone().unwrap(),
        vec!["root", "ops", "alice", "bob"]
    );
    assert_eq!(usernames(&ctrl), vec!["root", "ops", "bob"]);
    assert_eq!(
        server.call_log(),
        vec!["GET /api/users", "DELETE /api/users/u-1", "GET /api/users"]
    );
}

#[tokio::test]
async fn test_delete_user_failure_refreshes_and_notifies() {
    let (server, ctrl) = setup();
    ctrl.refresh().await;
    server.fail_next(HttpMethod::Delete, 500, "not json");

    ctrl.request_delete(user(&ctrl, "u-2"));
    let outcome = ctrl.confirm_delete().await;

    assert_eq!(outcome, Some(DeleteOutcome::Reverted));
    assert_eq!(usernames(&ctrl), vec!["root", "ops", "alice", "bob"]);
    assert_eq!(
        server.call_log(),
        vec!["GET /api/users", "DELETE /api/users/u-2", "GET /api/users"]
    );
    ctrl.state
        .peek(|s| assert_eq!(s.notification.as_deref(), Some(DELETE_USER_FAILED)));

    ctrl.dismiss_notification();
    ctrl.state.peek(|s| assert_eq!(s.notification, None));
}

#[tokio::test]
async fn test_delete_pending_is_dialog_gated() {
    let (server, ctrl) = setup();
    ctrl.refresh().await;

    // 没有待确认目标
    assert_eq!(ctrl.confirm_delete().await, None);

    let target = user(&ctrl, "u-1");
    ctrl.request_delete(target.clone());

    // 请求到达服务端时：处于 pending，无法关闭也无法再次确认或打开其他对话框
    let state = ctrl.state.clone();
    let probe = ctrl.clone();
    let checked = Rc::new(RefCell::new(false));
    let flag = checked.clone();
    server.on_send(move |req| {
        if req.method == HttpMethod::Delete {
            probe.close_dialog();
            assert!(!probe.open_create());
            state.peek(|s| assert_eq!(s.dialog, Dialog::Deleting(target.clone())));
            *flag.borrow_mut() = true;
        }
    });

    ctrl.confirm_delete().await;
    assert!(*checked.borrow());
    assert_eq!(
        server
            .call_log()
            .iter()
            .filter(|c| c.starts_with("DELETE"))
            .count(),
        1
    );
}

#[tokio::test]
async fn test_cancel_delete_sends_nothing() {
    let (server, ctrl) = setup();
    ctrl.refresh().await;
    ctrl.request_delete(user(&ctrl, "a-1"));
    ctrl.close_dialog();

    assert_eq!(ctrl.confirm_delete().await, None);
    assert_eq!(usernames(&ctrl).len(), 4);
    assert_eq!(server.call_log(), vec!["GET /api/users"]);
}

#[tokio::test]
async fn test_notification_timer_only_clears_its_own_occurrence() {
    let (server, ctrl) = setup();
    ctrl.refresh().await;

    server.fail_next(HttpMethod::Delete, 500, "");
    ctrl.request_delete(user(&ctrl, "u-1"));
    ctrl.confirm_delete().await;
    let first = ctrl.state.peek(|s| s.notification_seq());

    // 相同文案的第二次失败
    server.fail_next(HttpMethod::Delete, 500, "");
    ctrl.request_delete(user(&ctrl, "u-2"));
    ctrl.confirm_delete().await;
    let second = ctrl.state.peek(|s| s.notification_seq());
    assert_ne!(first, second);

    ctrl.expire_notification(first);
    ctrl.state
        .peek(|s| assert_eq!(s.notification.as_deref(), Some(DELETE_USER_FAILED)));

    ctrl.expire_notification(second);
    ctrl.state.peek(|s| assert_eq!(s.notification, None));
}
