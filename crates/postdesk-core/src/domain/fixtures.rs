use chrono::{TimeZone, Utc};

use super::{Post, PostId};

pub(crate) fn post(id: PostId, title: &str) -> Post {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Post {
        id,
        title: title.to_string(),
        slug: title.replace(' ', "-"),
        content: String::new(),
        created_at: at,
        updated_at: at,
        category: None,
        online: None,
    }
}
