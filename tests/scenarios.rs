use rs_authz::{
    Action, Comment, CommentId, Comments, Decision, Engine, EngineBuilder, Error, PermissionRule,
    PolicyTable, Post, PostId, Posts, Principal, PrincipalId, ResourcePolicy, Role, RolePolicy,
};

fn principal(id: &str, roles: &[Role]) -> Principal {
    Principal::new(PrincipalId::try_from(id).unwrap(), roles.iter().copied()).unwrap()
}

fn post(author: &str, published: bool) -> Post {
    Post {
        id: PostId::try_from("post_1").unwrap(),
        author_id: PrincipalId::try_from(author).unwrap(),
        title: "title".to_string(),
        content: "content".to_string(),
        is_published: published,
    }
}

fn comment(user: &str, parent: Post) -> Comment {
    Comment {
        id: CommentId::try_from("comment_1").unwrap(),
        user_id: PrincipalId::try_from(user).unwrap(),
        post_id: parent.id.clone(),
        content: "content".to_string(),
        post: parent,
    }
}

#[test]
fn admin_should_view_any_comment() {
    let engine = Engine::default();
    let admin = principal("admin1", &[Role::Admin]);
    let data = comment("someone", post("other", false));

    assert!(engine.has_permission(&admin, Comments, Action::View, Some(&data)));
}

#[test]
fn admin_should_be_allowed_everything_with_or_without_data() {
    let engine = Engine::default();
    let admin = principal("admin1", &[Role::Admin]);
    let post_data = post("other", false);
    let comment_data = comment("other", post("other", false));

    for action in Action::ALL {
        assert!(engine.has_permission(&admin, Posts, action, None));
        assert!(engine.has_permission(&admin, Posts, action, Some(&post_data)));
        assert!(engine.has_permission(&admin, Comments, action, None));
        assert!(engine.has_permission(&admin, Comments, action, Some(&comment_data)));
    }
}

#[test]
fn moderator_should_update_only_own_comment() {
    let engine = Engine::default();
    let moderator = principal("mod1", &[Role::Moderator]);

    let own = comment("mod1", post("user2", true));
    assert!(engine.has_permission(&moderator, Comments, Action::Update, Some(&own)));

    let other = comment("other", post("user2", true));
    assert!(!engine.has_permission(&moderator, Comments, Action::Update, Some(&other)));
}

#[test]
fn user_should_not_view_unpublished_foreign_post() {
    let engine = Engine::default();
    let user = principal("user1", &[Role::User]);

    assert!(!engine.has_permission(&user, Posts, Action::View, Some(&post("user2", false))));
}

#[test]
fn user_should_view_published_foreign_post() {
    let engine = Engine::default();
    let user = principal("user1", &[Role::User]);

    assert!(engine.has_permission(&user, Posts, Action::View, Some(&post("user2", true))));
}

#[test]
fn user_should_delete_comment_on_own_post() {
    let engine = Engine::default();
    let user = principal("user1", &[Role::User]);
    let data = comment("user2", post("user1", false));

    assert!(engine.has_permission(&user, Comments, Action::Delete, Some(&data)));
}

#[test]
fn create_comment_without_data_should_deny_for_predicate_roles() {
    let engine = Engine::default();
    for role in [Role::Moderator, Role::User] {
        let someone = principal("user1", &[role]);
        assert!(!engine.has_permission(&someone, Comments, Action::Create, None));
        assert_eq!(
            engine.decide(&someone, Comments, Action::Create, None),
            Decision::Deny
        );
    }
    let both = principal("user1", &[Role::Moderator, Role::User]);
    assert!(!engine.has_permission(&both, Comments, Action::Create, None));
}

#[test]
fn every_predicate_rule_should_deny_without_data() {
    let engine = Engine::default();
    let table = engine.policy();
    for role in [Role::Moderator, Role::User] {
        let someone = principal("user1", &[role]);
        for action in Action::ALL {
            if let Some(PermissionRule::Predicate(_)) = table.lookup::<Posts>(role, action) {
                assert!(!engine.has_permission(&someone, Posts, action, None));
            }
            if let Some(PermissionRule::Predicate(_)) = table.lookup::<Comments>(role, action) {
                assert!(!engine.has_permission(&someone, Comments, action, None));
            }
        }
    }
}

#[test]
fn role_union_should_grant_when_one_role_allows() {
    let engine = Engine::default();
    // USER may not delete someone else's comment on someone else's post; MODERATOR may.
    let data = comment("user2", post("user3", true));
    let user_only = principal("user1", &[Role::User]);
    let both = principal("user1", &[Role::User, Role::Moderator]);
    let reversed = principal("user1", &[Role::Moderator, Role::User]);

    assert!(!engine.has_permission(&user_only, Comments, Action::Delete, Some(&data)));
    assert!(engine.has_permission(&both, Comments, Action::Delete, Some(&data)));
    assert!(engine.has_permission(&reversed, Comments, Action::Delete, Some(&data)));
}

#[test]
fn ownership_should_be_exact_match() {
    let engine = Engine::default();
    let user = principal("user1", &[Role::User]);

    let prefixed = comment("user10", post("user2", true));
    assert!(!engine.has_permission(&user, Comments, Action::Update, Some(&prefixed)));

    let cased = comment("USER1", post("user2", true));
    assert!(!engine.has_permission(&user, Comments, Action::Update, Some(&cased)));

    assert!(!engine.has_permission(&user, Posts, Action::Update, Some(&post("user", false))));
}

#[test]
fn moderator_post_rules_should_follow_table() {
    let engine = Engine::default();
    let moderator = principal("mod1", &[Role::Moderator]);
    let foreign_published = post("user2", true);
    let foreign_draft = post("user2", false);
    let own_draft = post("mod1", false);

    assert!(engine.has_permission(&moderator, Posts, Action::Create, None));
    assert!(engine.has_permission(&moderator, Posts, Action::Delete, Some(&foreign_published)));
    assert!(!engine.has_permission(&moderator, Posts, Action::Delete, Some(&foreign_draft)));
    assert!(!engine.has_permission(&moderator, Posts, Action::Update, Some(&foreign_published)));
    assert!(engine.has_permission(&moderator, Posts, Action::Update, Some(&own_draft)));
    assert!(engine.has_permission(&moderator, Posts, Action::View, Some(&own_draft)));
}

#[test]
fn moderator_comment_rules_should_follow_table() {
    let engine = Engine::default();
    let moderator = principal("mod1", &[Role::Moderator]);

    assert!(engine.has_permission(&moderator, Comments, Action::View, None));
    assert!(engine.has_permission(&moderator, Comments, Action::Delete, None));

    let on_draft = comment("user2", post("user2", false));
    assert!(!engine.has_permission(&moderator, Comments, Action::Create, Some(&on_draft)));
    let on_own_draft = comment("user2", post("mod1", false));
    assert!(engine.has_permission(&moderator, Comments, Action::Create, Some(&on_own_draft)));
}

#[test]
fn user_comment_rules_should_follow_table() {
    let engine = Engine::default();
    let user = principal("user1", &[Role::User]);

    let on_published = comment("user2", post("user3", true));
    assert!(engine.has_permission(&user, Comments, Action::View, Some(&on_published)));
    assert!(engine.has_permission(&user, Comments, Action::Create, Some(&on_published)));
    assert!(!engine.has_permission(&user, Comments, Action::Update, Some(&on_published)));
    assert!(!engine.has_permission(&user, Comments, Action::Delete, Some(&on_published)));

    let own = comment("user1", post("user3", false));
    assert!(!engine.has_permission(&user, Comments, Action::View, Some(&own)));
    assert!(engine.has_permission(&user, Comments, Action::Update, Some(&own)));
    assert!(engine.has_permission(&user, Comments, Action::Delete, Some(&own)));
}

#[test]
fn user_post_rules_should_follow_table() {
    let engine = Engine::default();
    let user = principal("user1", &[Role::User]);

    assert!(engine.has_permission(&user, Posts, Action::Create, None));
    assert!(engine.has_permission(&user, Posts, Action::Update, Some(&post("user1", false))));
    assert!(engine.has_permission(&user, Posts, Action::Delete, Some(&post("user1", true))));
    assert!(!engine.has_permission(&user, Posts, Action::Delete, Some(&post("user2", true))));
}

static READ_ONLY: PolicyTable = PolicyTable {
    admin: RolePolicy::empty(),
    moderator: RolePolicy::empty(),
    user: RolePolicy {
        posts: ResourcePolicy {
            view: Some(PermissionRule::Allow),
            create: Some(PermissionRule::Deny),
            update: None,
            delete: None,
        },
        comments: ResourcePolicy::empty(),
    },
};

#[test]
fn custom_table_should_deny_by_default() {
    let engine = EngineBuilder::new().policy(&READ_ONLY).build();
    let admin = principal("admin1", &[Role::Admin]);
    let user = principal("user1", &[Role::User]);
    let data = post("user1", true);

    for action in Action::ALL {
        assert!(!engine.has_permission(&admin, Posts, action, Some(&data)));
        assert!(!engine.has_permission(&admin, Comments, action, None));
    }
    assert!(engine.has_permission(&user, Posts, Action::View, None));
    assert!(!engine.has_permission(&user, Posts, Action::Create, None));
    assert!(!engine.has_permission(&user, Posts, Action::Update, Some(&data)));
}

#[test]
fn authorize_should_surface_forbidden() {
    let engine = Engine::default();
    let user = principal("user1", &[Role::User]);

    let err = engine
        .authorize(&user, Posts, Action::Delete, Some(&post("user2", true)))
        .expect_err("must deny");
    assert!(matches!(err, Error::Forbidden { .. }));
    assert_eq!(err.to_string(), "forbidden: missing permission posts:delete");
}

#[test]
fn concurrent_evaluation_should_share_the_table() {
    let engine = Engine::default();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let user = principal(&format!("user{i}"), &[Role::User]);
                let own = post(&format!("user{i}"), false);
                let foreign = post("nobody", false);
                (0..1_000).all(|_| {
                    engine.has_permission(&user, Posts, Action::Update, Some(&own))
                        && !engine.has_permission(&user, Posts, Action::Update, Some(&foreign))
                })
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().expect("thread panicked"));
    }
}
