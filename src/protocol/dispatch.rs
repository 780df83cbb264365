// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single request/response exchange against the AJAX endpoint.

use crate::error::Error;
use crate::protocol::{Envelope, RequestHeaders, Transport};

/// POSTs `form` to `url` and normalizes the outcome into an [`Envelope`].
///
/// Transport failures propagate unchanged. Every HTTP answer, whatever its
/// status or body, becomes an envelope.
pub(crate) async fn dispatch<T: Transport>(
    transport: &T,
    url: &str,
    headers: &RequestHeaders,
    form: &[(&'static str, String)],
) -> Result<Envelope, Error> {
    let response = transport.post_form(url, headers, form).await?;
    let envelope = Envelope::classify(&response);

    tracing::debug!(
        url = %url,
        http_status = response.status,
        status = envelope.status,
        "Dispatched device command"
    );

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::mock::ScriptedTransport;
    use crate::protocol::{HttpResponse, SERVER_REDIRECTED};

    fn form() -> Vec<(&'static str, String)> {
        vec![
            ("method", "heater-on".to_string()),
            ("params", "1".to_string()),
            ("device", "D1".to_string()),
        ]
    }

    #[tokio::test]
    async fn dispatch_posts_form_with_headers() {
        let transport = ScriptedTransport::new()
            .reply(HttpResponse::new(200, r#"{"status":0,"message":"ok"}"#));
        let headers = RequestHeaders::new().with("Cookie", "PHPSESSID=s");

        let envelope = dispatch(&transport, "http://panel/ajax/", &headers, &form())
            .await
            .unwrap();

        assert!(envelope.is_success());
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, "http://panel/ajax/");
        assert_eq!(requests[0].headers.get("cookie"), Some("PHPSESSID=s"));
        assert_eq!(requests[0].form, form());
    }

    #[tokio::test]
    async fn dispatch_normalizes_redirect() {
        let transport = ScriptedTransport::new().reply(HttpResponse::new(302, ""));
        let envelope = dispatch(&transport, "u", &RequestHeaders::new(), &form())
            .await
            .unwrap();
        assert_eq!(envelope.message_text(), SERVER_REDIRECTED);
    }

    #[tokio::test]
    async fn dispatch_propagates_connection_failure() {
        let transport =
            ScriptedTransport::new().fail(Error::ConnectionFailed("http://panel".to_string()));
        let result = dispatch(&transport, "u", &RequestHeaders::new(), &form()).await;
        assert!(matches!(result, Err(Error::ConnectionFailed(_))));
    }
}
