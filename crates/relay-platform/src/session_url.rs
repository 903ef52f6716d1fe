//! Session identity carried in the page URL.
//!
//! The token lives in the `session` query parameter so it survives a reload
//! or a shared link. First visits mint a token and rewrite the URL in place
//! via `history.replaceState` — no navigation, no reload.

use wasm_bindgen::JsValue;

use relay_types::session::{SessionToken, OPERATOR_PARAM, SESSION_PARAM};

/// Outcome of resolving the session from the page URL.
pub struct ResolvedSession {
    pub token: SessionToken,
    /// `?operator=1` was present — seeds the worker role on first visit.
    pub operator_flag: bool,
    /// False when URL/history access failed and the token is in-memory
    /// only (the page still works; the link is just not shareable).
    pub persisted_in_url: bool,
}

/// Read the session token from the URL, minting and persisting one if
/// absent. Never fails: browser interop errors degrade to an in-memory
/// token for this page load.
pub fn resolve_or_create() -> ResolvedSession {
    match resolve_from_browser() {
        Ok(resolved) => resolved,
        Err(e) => {
            log::warn!(
                "URL session resolution unavailable ({:?}), using in-memory token",
                e
            );
            ResolvedSession {
                token: SessionToken::mint(),
                operator_flag: false,
                persisted_in_url: false,
            }
        }
    }
}

fn resolve_from_browser() -> Result<ResolvedSession, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let location = window.location();
    let search = location.search()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search)?;

    let operator_flag = params.get(OPERATOR_PARAM).as_deref() == Some("1");

    if let Some(existing) = params.get(SESSION_PARAM).filter(|t| !t.is_empty()) {
        return Ok(ResolvedSession {
            token: SessionToken::new(existing),
            operator_flag,
            persisted_in_url: true,
        });
    }

    let token = SessionToken::mint();
    params.set(SESSION_PARAM, token.as_str());
    let new_url = format!("{}?{}", location.pathname()?, String::from(params.to_string()));

    let persisted_in_url = match window.history().and_then(|h| {
        h.replace_state_with_url(&JsValue::NULL, "", Some(&new_url))
    }) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("history.replaceState failed ({:?}), token is in-memory only", e);
            false
        }
    };

    Ok(ResolvedSession {
        token,
        operator_flag,
        persisted_in_url,
    })
}

/// Leave the session view: navigate to the bare path, dropping the token
/// from the URL. Used by the explicit end-session action.
pub fn navigate_to_bare_path() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let location = window.location();
    if let Ok(path) = location.pathname() {
        if let Err(e) = location.set_href(&path) {
            log::error!("Failed to navigate away: {:?}", e);
        }
    }
}
