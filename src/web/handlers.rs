//! Request handlers and page rendering for the upload front end

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::response::Html;
use tracing::{info, warn};

use crate::constants::upload::ALLOWED_EXTENSIONS;
use crate::recommend::{Recommendation, Recommender};

/// Shared state for all handlers
pub struct WebState {
    pub recommender: Recommender,
    pub upload_dir: PathBuf,
}

/// GET / — the upload form
pub async fn index() -> Html<String> {
    Html(render_page(&form_section(), None, &[]))
}

/// POST /upload — accept a query image and render the five closest logos
pub async fn upload(
    State(state): State<Arc<WebState>>,
    mut multipart: Multipart,
) -> Html<String> {
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("logo") => break field,
            Ok(Some(_)) => continue,
            Ok(None) => return error_page("No file uploaded"),
            Err(e) => {
                warn!("multipart read failed: {}", e);
                return error_page("Upload failed. The file may be too large (8 MiB limit).");
            }
        }
    };

    let filename = match field.file_name() {
        Some(name) if !name.is_empty() => sanitize_filename(name),
        _ => return error_page("No file selected"),
    };

    if !has_allowed_extension(&filename) {
        return error_page("Unsupported file type. Please upload a PNG or JPEG image.");
    }

    let bytes = match field.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("reading upload body failed: {}", e);
            return error_page("Upload failed. The file may be too large (8 MiB limit).");
        }
    };

    // Keep a copy on disk so the results page can show the query image
    let saved_path = state.upload_dir.join(&filename);
    if let Err(e) = tokio::fs::write(&saved_path, &bytes).await {
        warn!("failed to save upload {}: {}", saved_path.display(), e);
        return error_page("Could not store the uploaded file.");
    }

    match state.recommender.recommend(&bytes) {
        Ok(recommendations) => {
            info!(
                file = %filename,
                matches = recommendations.len(),
                "query matched"
            );
            Html(render_page(&form_section(), Some(&filename), &recommendations))
        }
        Err(e) => {
            warn!("recommendation failed: {}", e);
            error_page(&e.user_message())
        }
    }
}

fn error_page(message: &str) -> Html<String> {
    Html(render_page(
        &format!(
            "{}<p class=\"error\">{}</p>",
            form_section(),
            escape_html(message)
        ),
        None,
        &[],
    ))
}

/// Strip path components and anything outside [A-Za-z0-9._-]
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "upload.png".to_string()
    } else {
        cleaned
    }
}

fn has_allowed_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn form_section() -> String {
    concat!(
        "<h1>Stock picks by logo color</h1>",
        "<p>Upload an image and get the five S&amp;P 500 companies whose ",
        "logos are closest in color.</p>",
        "<form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">",
        "<input type=\"file\" name=\"logo\" accept=\".png,.jpg,.jpeg\">",
        "<button type=\"submit\">Match</button>",
        "</form>"
    )
    .to_string()
}

fn render_page(body: &str, query_file: Option<&str>, recs: &[Recommendation]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><html><head><title>logorec</title><style>\
         body{font-family:sans-serif;max-width:640px;margin:2em auto}\
         table{border-collapse:collapse;width:100%}\
         td,th{border:1px solid #ccc;padding:6px;text-align:left}\
         img.logo{height:48px}.swatch{display:inline-block;width:24px;height:24px;\
         vertical-align:middle;border:1px solid #999}.error{color:#b00}\
         </style></head><body>",
    );
    html.push_str(body);

    if let Some(filename) = query_file {
        html.push_str(&format!(
            "<h2>Your image</h2><img class=\"logo\" src=\"/display/uploads/{}\" alt=\"query\">",
            escape_html(filename)
        ));

        if recs.is_empty() {
            html.push_str("<p>No logos available to match against.</p>");
        } else {
            html.push_str(
                "<h2>Closest logos</h2><table>\
                 <tr><th>Logo</th><th>Ticker</th><th>Name</th><th>Score</th><th>Color</th></tr>",
            );
            for rec in recs {
                html.push_str(&format!(
                    "<tr><td><img class=\"logo\" src=\"/display/{logo}\" alt=\"{ticker}\"></td>\
                     <td>{ticker}</td><td>{name}</td><td>{score:.2}</td>\
                     <td><span class=\"swatch\" style=\"background:{hex}\"></span> {hex}</td></tr>",
                    logo = escape_html(&rec.logo_file),
                    ticker = escape_html(&rec.ticker),
                    name = escape_html(&rec.name),
                    score = rec.score,
                    hex = escape_html(&rec.swatch_hex),
                ));
            }
            html.push_str("</table>");
        }
    }

    html.push_str("</body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename_strips_paths() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\temp\\logo.png"), "logo.png");
        assert_eq!(sanitize_filename("my logo (1).png"), "my_logo__1_.png");
        assert_eq!(sanitize_filename("...."), "upload.png");
    }

    #[test]
    fn test_allowed_extensions() {
        assert!(has_allowed_extension("logo.png"));
        assert!(has_allowed_extension("logo.JPEG"));
        assert!(has_allowed_extension("logo.jpg"));
        assert!(!has_allowed_extension("logo.gif"));
        assert!(!has_allowed_extension("noextension"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>\"&\"</script>"),
            "&lt;script&gt;&quot;&amp;&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_result_rows_render_scores_rounded() {
        let recs = vec![Recommendation {
            ticker: "AAPL".into(),
            name: "Apple Inc.".into(),
            score: 1.2345,
            swatch_hex: "#AABBCC".into(),
            logo_file: "AAPL.png".into(),
        }];
        let page = render_page(&form_section(), Some("query.png"), &recs);
        assert!(page.contains("1.23"));
        assert!(page.contains("AAPL"));
        assert!(page.contains("/display/uploads/query.png"));
    }
}
