// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the POST /chat request type: deserialization and validation

use fabstir_campaign_node::api::ChatRequest;

fn valid_request() -> ChatRequest {
    ChatRequest {
        project_name: "Acme Tacos".to_string(),
        website_url: "https://acmetacos.example".to_string(),
        description: Some("Family taqueria".to_string()),
        goals: vec!["grow followers".to_string()],
        timeframe: Some("next week".to_string()),
    }
}

#[test]
fn test_request_deserialization_all_fields() {
    let json = r#"{
        "project_name": "Acme Tacos",
        "website_url": "https://acmetacos.example",
        "description": "Family taqueria",
        "goals": ["grow followers", "promote catering"],
        "timeframe": "next week"
    }"#;
    let req: ChatRequest = serde_json::from_str(json).unwrap();
    assert_eq!(req.project_name, "Acme Tacos");
    assert_eq!(req.website_url, "https://acmetacos.example");
    assert_eq!(req.description.as_deref(), Some("Family taqueria"));
    assert_eq!(req.goals.len(), 2);
    assert_eq!(req.timeframe.as_deref(), Some("next week"));
}

#[test]
fn test_request_deserialization_optional_fields_default() {
    let json = r#"{
        "project_name": "Acme",
        "website_url": "https://acme.example",
        "goals": ["grow"]
    }"#;
    let req: ChatRequest = serde_json::from_str(json).unwrap();
    assert!(req.description.is_none());
    assert!(req.timeframe.is_none());
}

#[test]
fn test_request_deserialization_requires_goals() {
    let json = r#"{
        "project_name": "Acme",
        "website_url": "https://acme.example"
    }"#;
    assert!(serde_json::from_str::<ChatRequest>(json).is_err());
}

#[test]
fn test_validate_valid_request_passes() {
    assert!(valid_request().validate().is_ok());
}

#[test]
fn test_validate_empty_project_name_returns_error() {
    let mut req = valid_request();
    req.project_name = "  ".to_string();
    let result = req.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("project_name"));
}

#[test]
fn test_validate_malformed_website_url_returns_error() {
    let mut req = valid_request();
    req.website_url = "not a url".to_string();
    let result = req.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("website_url"));
}

#[test]
fn test_validate_empty_goals_returns_error() {
    let mut req = valid_request();
    req.goals = vec![];
    let result = req.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("goals"));
}

#[test]
fn test_validate_blank_goal_entry_returns_error() {
    let mut req = valid_request();
    req.goals = vec!["grow followers".to_string(), "   ".to_string()];
    assert!(req.validate().is_err());
}
