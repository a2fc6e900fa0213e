use ipa_domain::{DirectoryUser, UserId};
use ipa_infrastructure::InMemoryUserDirectory;

const DEMO_USERS: &[(u64, &str, &str, &str, &str, bool)] = &[
    (1, "admin", "Administrator", "admin", "IT", false),
    (2, "dwahyuni", "Dewi Wahyuni", "Corp FA", "Corporate Finance", true),
    (3, "bsantoso", "Budi Santoso", "Corp FA", "Corporate Finance", true),
    (4, "hgunawan", "Hendra Gunawan", "Direktur", "Board of Directors", true),
    (5, "spratama", "Sari Pratama", "CEO", "Board of Directors", true),
    (6, "alubis", "Agus Lubis", "CFO", "Board of Directors", true),
    (
        7,
        "mnasution",
        "Maya Nasution",
        "Sourcing dan Procurement",
        "Procurement",
        true,
    ),
];

pub fn demo_directory() -> InMemoryUserDirectory {
    InMemoryUserDirectory::with_users(DEMO_USERS.iter().map(
        |(id, username, full_name, role, department, is_ldap_user)| DirectoryUser {
            id: UserId::new(*id),
            username: (*username).to_owned(),
            email: format!("{username}@ipa.local"),
            full_name: (*full_name).to_owned(),
            role: (*role).to_owned(),
            department: (*department).to_owned(),
            is_active: true,
            is_ldap_user: *is_ldap_user,
            last_login_at: None,
        },
    ))
}
