//! Brute-force resolution of "which database signed this request".

use crate::signature::authorization_header;
use store::VuforiaDatabase;

/// Which credential pair of a database a resolution should use.
#[derive(Debug, Clone, Copy)]
enum KeyKind {
    Server,
    Client,
}

/// Return the database whose **server** key pair signed the request, if any.
pub fn get_database_matching_server_keys<'a>(
    databases: &'a [VuforiaDatabase],
    authorization: Option<&str>,
    method: &str,
    content: &[u8],
    content_type: &str,
    date: &str,
    request_path: &str,
) -> Option<&'a VuforiaDatabase> {
    resolve(
        databases,
        KeyKind::Server,
        authorization,
        method,
        content,
        content_type,
        date,
        request_path,
    )
}

/// Return the database whose **client** key pair signed the request, if any.
pub fn get_database_matching_client_keys<'a>(
    databases: &'a [VuforiaDatabase],
    authorization: Option<&str>,
    method: &str,
    content: &[u8],
    content_type: &str,
    date: &str,
    request_path: &str,
) -> Option<&'a VuforiaDatabase> {
    resolve(
        databases,
        KeyKind::Client,
        authorization,
        method,
        content,
        content_type,
        date,
        request_path,
    )
}

#[allow(clippy::too_many_arguments)]
fn resolve<'a>(
    databases: &'a [VuforiaDatabase],
    kind: KeyKind,
    authorization: Option<&str>,
    method: &str,
    content: &[u8],
    content_type: &str,
    date: &str,
    request_path: &str,
) -> Option<&'a VuforiaDatabase> {
    let given = authorization?;
    databases.iter().find(|database| {
        let (access_key, secret_key) = match kind {
            KeyKind::Server => (&database.server_access_key, &database.server_secret_key),
            KeyKind::Client => (&database.client_access_key, &database.client_secret_key),
        };
        let expected = authorization_header(
            access_key,
            secret_key,
            method,
            content,
            content_type,
            date,
            request_path,
        );
        expected == given
    })
}
