use crate::model::User;

/// Case-insensitive substring match on name, email or profession.
/// `needle` must already be lower-cased.
pub fn matches(user: &User, needle: &str) -> bool {
    needle.is_empty()
        || user.name.to_lowercase().contains(needle)
        || user.email.to_lowercase().contains(needle)
        || user.profession.to_lowercase().contains(needle)
}

/// Lazy view over `users` keeping server order. An empty term yields everything.
pub fn filter_users<'a>(users: &'a [User], term: &str) -> impl Iterator<Item = &'a User> + use<'a> {
    let needle = term.to_lowercase();
    users.iter().filter(move |u| matches(u, &needle))
}

/// Text shown when the filtered view is empty.
pub fn empty_state_message(term: &str) -> String {
    if term.is_empty() {
        "No users in the database yet. Add your first user!".to_string()
    } else {
        format!("No users match \"{term}\". Try a different search term.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UserId;

    fn mk_user(id: &str, name: &str, email: &str, profession: &str) -> User {
        User {
            id: UserId::new(id),
            name: name.to_string(),
            email: email.to_string(),
            age: 30,
            profession: profession.to_string(),
            created_at: None,
            updated_at: None,
        }
    }

    fn sample() -> Vec<User> {
        vec![
            mk_user("1", "Ann", "ann@x.co", "Dev"),
            mk_user("2", "Bob", "bobby@tables.org", "DBA"),
            mk_user("3", "Cy", "cy@x.co", "Developer Advocate"),
        ]
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let users = sample();
        let ids = |term: &str| filter_users(&users, term).map(|u| u.id.as_str().to_string()).collect::<Vec<_>>();
        assert_eq!(ids("ann"), vec!["1"]);
        assert_eq!(ids("TABLES"), vec!["2"]);
        assert_eq!(ids("dev"), vec!["1", "3"]);
        assert!(ids("zzz").is_empty());
    }

    #[test]
    fn empty_term_keeps_everything_in_order() {
        let users = sample();
        let names: Vec<&str> = filter_users(&users, "").map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Bob", "Cy"]);
    }

    #[test]
    fn filtering_is_repeatable_and_leaves_input_untouched() {
        let users = sample();
        let before = users.clone();
        let first: Vec<_> = filter_users(&users, "x.co").cloned().collect();
        let second: Vec<_> = filter_users(&users, "x.co").cloned().collect();
        assert_eq!(first, second);
        assert_eq!(users, before);
    }

    #[test]
    fn empty_state_depends_on_term() {
        assert!(empty_state_message("").contains("Add your first user"));
        assert_eq!(
            empty_state_message("zed"),
            "No users match \"zed\". Try a different search term."
        );
    }
}
