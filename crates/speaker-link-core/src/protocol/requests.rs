//! Request builders for the backend's HTTP endpoints.

use std::net::Ipv4Addr;

use serde_json::json;

use crate::model::GroupSelector;

/// HTTP method used by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A fully described backend request, independent of the HTTP client.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: &'static str,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    fn get(path: &'static str) -> Self {
        Self {
            method: Method::Get,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    fn post(path: &'static str) -> Self {
        Self {
            method: Method::Post,
            ..Self::get(path)
        }
    }

    /// `GET /speakers`
    pub fn list_speakers() -> Self {
        Self::get("/speakers")
    }

    /// `POST /addSpeaker?ip=<addr>&name=<optional>`
    pub fn add_speaker(ip: Ipv4Addr, name: Option<&str>) -> Self {
        let mut request = Self::post("/addSpeaker");
        request.query.push(("ip", ip.to_string()));
        if let Some(name) = name {
            request.query.push(("name", name.to_string()));
        }
        request
    }

    /// `POST /group` with `{"speakerName": [...]}`
    pub fn group(speaker_names: &[String]) -> Self {
        let mut request = Self::post("/group");
        request.body = Some(json!({ "speakerName": speaker_names }));
        request
    }

    /// `GET /ungroup` or `GET /ungroup?group_name=<name>`
    pub fn ungroup(selector: &GroupSelector) -> Self {
        let mut request = Self::get("/ungroup");
        if let GroupSelector::Named(name) = selector {
            request.query.push(("group_name", name.clone()));
        }
        request
    }

    /// `GET /status`
    pub fn status() -> Self {
        Self::get("/status")
    }

    /// Short label for logs, e.g. `POST /group`.
    pub fn describe(&self) -> String {
        let method = match self.method {
            Method::Get => "GET",
            Method::Post => "POST",
        };
        format!("{} {}", method, self.path)
    }
}

/// Raw reply: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

impl ApiReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Exactly 200, the success criterion for group and ungroup.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_speaker_query() {
        let req = ApiRequest::add_speaker(Ipv4Addr::new(192, 168, 1, 5), Some("Den"));
        assert_eq!(req.method, Method::Post);
        assert_eq!(req.path, "/addSpeaker");
        assert_eq!(
            req.query,
            vec![("ip", "192.168.1.5".to_string()), ("name", "Den".to_string())]
        );

        let req = ApiRequest::add_speaker(Ipv4Addr::new(10, 0, 0, 1), None);
        assert_eq!(req.query, vec![("ip", "10.0.0.1".to_string())]);
    }

    #[test]
    fn test_group_body() {
        let names = vec!["Kitchen".to_string(), "Den".to_string()];
        let req = ApiRequest::group(&names);
        assert_eq!(req.describe(), "POST /group");
        assert_eq!(req.body, Some(json!({"speakerName": ["Kitchen", "Den"]})));
    }

    #[test]
    fn test_ungroup_selector() {
        assert!(ApiRequest::ungroup(&GroupSelector::All).query.is_empty());
        let req = ApiRequest::ungroup(&GroupSelector::Named("Living Room".to_string()));
        assert_eq!(req.query, vec![("group_name", "Living Room".to_string())]);
    }

    #[test]
    fn test_reply_success_rules() {
        assert!(ApiReply::new(204, "").is_success());
        assert!(!ApiReply::new(204, "").is_ok());
        assert!(ApiReply::new(200, "OK").is_ok());
        assert!(!ApiReply::new(404, "").is_success());
    }
}
