mod collate;
mod date;
mod post;

pub use self::{
    collate::compare_titles,
    date::{format_post_date, normalize_timestamp, parse_post_date},
    post::{ERROR_CONTENT, ERROR_TITLE, PostDetail, PostSummary, RemotePost, RouteKey},
};
