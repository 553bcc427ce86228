use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::SignedCookieJar;
use tracing::{error, info, warn};

use super::AppState;
use super::flash;
use super::upload::{ConvertedCsv, UploadRejection, check_filename, convert_upload};

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Santander to YNAB Converter</title>
</head>
<body>
  <h1>Santander to YNAB Converter</h1>
  {flash}
  <form action="/convert" method="post" enctype="multipart/form-data">
    <input type="file" name="file" accept=".xls,.xlsx">
    <button type="submit">Convert</button>
  </form>
  <p>Upload your Santander Excel export (.xls or .xlsx) to download a CSV ready for YNAB import.</p>
</body>
</html>
"#;

struct Upload {
    filename: String,
    content: Bytes,
}

pub(super) async fn index(jar: SignedCookieJar) -> (SignedCookieJar, Html<String>) {
    let (jar, message) = flash::take(jar);
    let flash = message
        .map(|m| format!(r#"<p class="flash error">{}</p>"#, escape_html(&m)))
        .unwrap_or_default();

    (jar, Html(INDEX_HTML.replace("{flash}", &flash)))
}

pub(super) async fn convert(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut multipart: Multipart,
) -> Result<Response, MultipartError> {
    let Some(upload) = read_file_field(&mut multipart).await? else {
        return Ok(reject(jar, UploadRejection::NoFileUploaded.message()));
    };
    if let Err(rejection) = check_filename(&upload.filename) {
        return Ok(reject(jar, rejection.message()));
    }

    let temp_dir = state.config.temp_dir.clone();
    let filename = upload.filename.clone();
    let converted = tokio::task::spawn_blocking(move || {
        convert_upload(&temp_dir, &upload.filename, &upload.content)
    })
    .await;

    match converted {
        Ok(Ok(csv)) => {
            info!(file = %filename, rows = csv.transactions, "converted upload");
            Ok(csv.into_response())
        }
        Ok(Err(e)) => {
            warn!(file = %filename, error = %e, "conversion failed");
            Ok(reject(jar, &format!("Error converting file: {}", e)))
        }
        Err(e) => {
            error!(file = %filename, error = %e, "conversion task failed");
            Ok(reject(jar, "Error converting file: internal error"))
        }
    }
}

/// First multipart field named `file`, if the form sent one.
async fn read_file_field(multipart: &mut Multipart) -> Result<Option<Upload>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content = field.bytes().await?;
        return Ok(Some(Upload { filename, content }));
    }
    Ok(None)
}

fn reject(jar: SignedCookieJar, message: &str) -> Response {
    (flash::set(jar, message), Redirect::to("/")).into_response()
}

impl IntoResponse for ConvertedCsv {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.download_name);
        (
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.body,
        )
            .into_response()
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"R&D" isn't</b>"#),
            "&lt;b&gt;&quot;R&amp;D&quot; isn&#x27;t&lt;/b&gt;"
        );
    }

    #[test]
    fn test_converted_csv_response_headers() {
        let response = ConvertedCsv {
            download_name: "movimientos_ynab.csv".to_string(),
            body: b"Date,Payee,Memo,Outflow,Inflow\n".to_vec(),
            transactions: 0,
        }
        .into_response();

        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "text/csv");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"movimientos_ynab.csv\""
        );
    }
}
