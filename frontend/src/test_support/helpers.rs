use crate::state::profile::LocalUser;

pub fn regular_user() -> LocalUser {
    LocalUser {
        id: "u-regular".into(),
        email: Some("student@x.edu".into()),
        display_name: "Student".into(),
        avatar_url: "https://placehold.co/100x100.png?text=ST".into(),
        is_admin: false,
    }
}

pub fn admin_user() -> LocalUser {
    LocalUser {
        is_admin: true,
        id: "u-admin".into(),
        display_name: "Admin".into(),
        ..regular_user()
    }
}
