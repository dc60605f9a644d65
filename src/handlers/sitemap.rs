use axum::http::header;
use axum::response::{IntoResponse, Response};

const SITE_URL: &str = "https://strongbots.com";

struct SitemapEntry {
    path: &'static str,
    change_frequency: &'static str,
    priority: &'static str,
}

const ENTRIES: [SitemapEntry; 4] = [
    SitemapEntry {
        path: "/",
        change_frequency: "weekly",
        priority: "1.0",
    },
    SitemapEntry {
        path: "/services",
        change_frequency: "monthly",
        priority: "0.8",
    },
    SitemapEntry {
        path: "/about",
        change_frequency: "monthly",
        priority: "0.8",
    },
    SitemapEntry {
        path: "/contact",
        change_frequency: "monthly",
        priority: "0.5",
    },
];

fn render(last_modified: &str) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in &ENTRIES {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{SITE_URL}{}</loc>\n", entry.path));
        xml.push_str(&format!("    <lastmod>{last_modified}</lastmod>\n"));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency
        ));
        xml.push_str(&format!("    <priority>{}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

// GET /sitemap.xml
pub async fn sitemap() -> Response {
    // The pages are static; "last modified" is simply today.
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        render(&today),
    )
        .into_response()
}
