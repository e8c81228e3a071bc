use crate::models::user::User;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
{body}
</body>
</html>
"#,
        title = text(title),
        body = body,
    )
}

pub fn index_page(signed_in: bool) -> String {
    let home_link = if signed_in {
        r#"<p><a href="/home">Continue to your saved searches</a></p>"#
    } else {
        ""
    };

    layout(
        "Saved Searches",
        &format!(
            r#"<h1>Saved Searches</h1>
<p>Sign in to browse the searches saved on your Twitter account.</p>
<p><a class="button" href="/oauth">Sign in with Twitter</a></p>
{}"#,
            home_link
        ),
    )
}

pub fn home_page(user: &User) -> String {
    let avatar = user
        .profile_image_url_https
        .as_deref()
        .map(|url| format!(r#"<img class="avatar" src="{}" alt="">"#, attr(url)))
        .unwrap_or_default();
    let description = user
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!("<p>{}</p>", text(d)))
        .unwrap_or_default();

    layout(
        &format!("@{}", user.screen_name),
        &format!(
            r#"<header>
    {avatar}
    <h1>{name} <small>@{screen_name}</small></h1>
    {description}
    <ul class="counts">
        <li>{statuses} tweets</li>
        <li>{friends} following</li>
        <li>{followers} followers</li>
    </ul>
    <form method="post" action="/logout"><button type="submit">Sign out</button></form>
</header>
<section>
    <h2>Saved searches</h2>
    <table id="saved-searches" data-source="/api/saved_searches/list">
        <thead><tr><th>Name</th><th>Query</th><th>Saved</th></tr></thead>
        <tbody></tbody>
    </table>
</section>
<script src="/static/app.js"></script>"#,
            avatar = avatar,
            name = text(&user.name),
            screen_name = text(&user.screen_name),
            description = description,
            statuses = user.statuses_count,
            friends = user.friends_count,
            followers = user.followers_count,
        ),
    )
}
