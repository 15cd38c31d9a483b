//! Tests for the case management client

use super::*;
use crate::auth::AuthConfig;
use crate::error::Error;
use crate::pagination::PagedResponse;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{
    body_json, body_string_contains, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(server: &MockServer) -> CaseManagementV1 {
    CaseManagementV1::new(
        CaseManagementV1Options::default()
            .url(server.uri())
            .authenticator(AuthConfig::NoAuth),
    )
    .unwrap()
}

fn case_json(number: &str) -> serde_json::Value {
    json!({
        "number": number,
        "short_description": "Cannot log in",
        "status": "new",
        "severity": 4,
        "created_by": { "realm": "IBMid", "user_id": "abc@ibm.com", "name": "A B" },
        "eu": { "support": false, "data_center": "dal10" },
        "comments": [{ "value": "first", "added_at": "2024-01-01T00:00:00Z" }]
    })
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_requires_authenticator() {
    let err = CaseManagementV1::new(CaseManagementV1Options::default()).unwrap_err();
    assert!(matches!(err, Error::MissingConfigField { .. }));
}

#[test]
fn test_new_uses_default_url() {
    let service = CaseManagementV1::new(
        CaseManagementV1Options::default().authenticator(AuthConfig::bearer("token")),
    )
    .unwrap();
    assert_eq!(service.service_url(), DEFAULT_SERVICE_URL);
}

#[test]
fn test_no_regional_urls() {
    assert!(CaseManagementV1::get_service_url_for_region("us-south").is_err());
}

#[test]
fn test_client_settings() {
    let mut service = CaseManagementV1::new(
        CaseManagementV1Options::default().authenticator(AuthConfig::NoAuth),
    )
    .unwrap();

    service.set_service_url("https://example.test/v1").unwrap();
    assert_eq!(service.service_url(), "https://example.test/v1");
    assert!(service.set_service_url("https://{region}.example.test").is_err());

    assert!(!service.enable_gzip_compression());
    service.set_enable_gzip_compression(true).unwrap();
    assert!(service.enable_gzip_compression());

    service.enable_retries(3, Duration::from_secs(10));
    assert_eq!(service.client().config().max_retries, 3);
    service.disable_retries();
    assert_eq!(service.client().config().max_retries, 0);
}

// ============================================================================
// Cases
// ============================================================================

#[tokio::test]
async fn test_get_cases_sends_query_and_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cases"))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "10"))
        .and(query_param("search", "login"))
        .and(query_param("sort", "~number"))
        .and(query_param("status", "new,in_progress"))
        .and(query_param("fields", "number,status"))
        .and(header("Accept", "application/json"))
        .and(header(
            "X-IBMCloud-SDK-Analytics",
            "service_name=case_management;service_version=V1;operation_id=GetCases",
        ))
        .and(header("X-Trace", "t-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "first": { "href": "/cases?offset=0" },
            "cases": [case_json("CS0001")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let options = GetCasesOptions::new()
        .offset(0)
        .limit(10)
        .search("login")
        .sort(format!("{}number", GetCasesOptions::SORT_DESCENDING_PREFIX))
        .status([GetCasesOptions::STATUS_NEW, GetCasesOptions::STATUS_IN_PROGRESS])
        .fields([fields::NUMBER, fields::STATUS])
        .header("X-Trace", "t-1");

    let response = service.get_cases(&options).await.unwrap();
    assert_eq!(response.status_code, 200);

    let list = response.result;
    assert_eq!(list.total_count, Some(1));
    assert_eq!(list.get_next_offset().unwrap(), None);
    assert_eq!(list.cases[0].number.as_deref(), Some("CS0001"));
    assert_eq!(
        list.cases[0].created_by.as_ref().map(|u| u.realm.as_str()),
        Some(User::REALM_IBMID)
    );
}

#[tokio::test]
async fn test_caller_headers_override_sdk_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cases/CS0001"))
        .and(header("Accept", "application/vnd.case+json"))
        .and(header("X-IBMCloud-SDK-Analytics", "custom"))
        .respond_with(ResponseTemplate::new(200).set_body_json(case_json("CS0001")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let options = GetCaseOptions::new("CS0001")
        .header("accept", "application/vnd.case+json")
        .header("x-ibmcloud-sdk-analytics", "custom");

    let case = service.get_case(&options).await.unwrap().into_result();
    assert_eq!(case.number.as_deref(), Some("CS0001"));
}

#[tokio::test]
async fn test_get_cases_pager_walks_all_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cases"))
        .and(query_param_is_missing("offset"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 3,
            "next": { "href": "/case-management/v1/cases?limit=2&offset=2" },
            "cases": [case_json("CS1"), case_json("CS2")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cases"))
        .and(query_param("offset", "2"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 3,
            "cases": [case_json("CS3")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let mut pager = service
        .get_cases_pager(&GetCasesOptions::new().limit(2))
        .unwrap();

    let cases = pager.get_all().await.unwrap();
    let numbers: Vec<_> = cases.iter().filter_map(|c| c.number.as_deref()).collect();
    assert_eq!(numbers, vec!["CS1", "CS2", "CS3"]);
    assert!(!pager.has_next());
    assert!(matches!(pager.get_next().await, Err(Error::NoMoreResults)));
}

#[tokio::test]
async fn test_get_cases_pager_rejects_offset() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    let err = service
        .get_cases_pager(&GetCasesOptions::new().offset(5))
        .unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_case() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cases"))
        .and(body_json(json!({
            "type": "technical",
            "subject": "Cannot log in",
            "description": "Login page returns 500",
            "severity": 2,
            "offering": {
                "name": "Cloud Object Storage",
                "type": { "group": "crn_service_name", "key": "cloud-object-storage" }
            },
            "resources": [{ "crn": "crn:v1:bluemix:public:cloud-object-storage:global:a/1::" }],
            "watchlist": [{ "realm": "IBMid", "user_id": "watcher@ibm.com" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(case_json("CS0002")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let options = CreateCaseOptions::new(
        CreateCaseOptions::TYPE_TECHNICAL,
        "Cannot log in",
        "Login page returns 500",
    )
    .severity(2)
    .offering(Offering::new(
        "Cloud Object Storage",
        OfferingType::new(OfferingType::GROUP_CRN_SERVICE_NAME, "cloud-object-storage"),
    ))
    .resource(ResourcePayload::crn(
        "crn:v1:bluemix:public:cloud-object-storage:global:a/1::",
    ))
    .watcher(User::new(User::REALM_IBMID, "watcher@ibm.com"));

    let response = service.create_case(&options).await.unwrap();
    assert_eq!(response.result.number.as_deref(), Some("CS0002"));
}

#[tokio::test]
async fn test_create_case_requires_fields() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    let options = CreateCaseOptions::new(CreateCaseOptions::TYPE_TECHNICAL, "", "description");
    let err = service.create_case(&options).await.unwrap_err();

    assert!(matches!(err, Error::Validation { .. }));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_case() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cases/CS0001"))
        .and(query_param("fields", "number,comments"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Request-Id", "req-9")
                .set_body_json(case_json("CS0001")),
        )
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let response = service
        .get_case(&GetCaseOptions::new("CS0001").fields([fields::NUMBER, fields::COMMENTS]))
        .await
        .unwrap();

    assert_eq!(response.header("X-Request-Id"), Some("req-9"));
    let case = response.into_result();
    assert_eq!(case.severity, Some(4.0));
    assert_eq!(case.comments.len(), 1);
    assert_eq!(
        case.eu,
        Some(CaseEu {
            support: Some(false),
            data_center: Some("dal10".to_string()),
        })
    );
}

#[tokio::test]
async fn test_empty_case_number_rejected() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    let err = service.get_case(&GetCaseOptions::new("")).await.unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));

    let err = service
        .download_file(&DownloadFileOptions::new("CS0001", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_service_error_surfaces_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cases/CS404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{ "code": "not_found", "message": "Case CS404 was not found" }]
        })))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let err = service.get_case(&GetCaseOptions::new("CS404")).await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.to_string(), "HTTP 404: Case CS404 was not found");
}

#[tokio::test]
async fn test_bearer_token_applied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cases"))
        .and(header("Authorization", "Bearer my-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cases": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = CaseManagementV1::new(
        CaseManagementV1Options::default()
            .url(mock_server.uri())
            .authenticator(AuthConfig::bearer("my-token")),
    )
    .unwrap();

    let list = service.get_cases(&GetCasesOptions::new()).await.unwrap().result;
    assert!(list.into_items().is_empty());
}

// ============================================================================
// Case updates
// ============================================================================

#[tokio::test]
async fn test_update_case_status_resolve() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/cases/CS0001/status"))
        .and(body_json(json!({
            "action": "resolve",
            "comment": "Fixed by restart",
            "resolution_code": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(case_json("CS0001")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let payload = StatusPayload::resolve(
        ResolutionCode::ClientError,
        Some("Fixed by restart".to_string()),
    );
    let response = service
        .update_case_status(&UpdateCaseStatusOptions::new("CS0001", payload))
        .await
        .unwrap();
    assert_eq!(response.status_code, 200);
}

#[tokio::test]
async fn test_add_comment() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/cases/CS0001/comments"))
        .and(body_json(json!({ "comment": "Any update?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": "Any update?",
            "added_at": "2024-02-01T10:00:00Z",
            "added_by": { "realm": "IBMid", "user_id": "me@ibm.com" }
        })))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let comment = service
        .add_comment(&AddCommentOptions::new("CS0001", "Any update?"))
        .await
        .unwrap()
        .result;
    assert_eq!(comment.value.as_deref(), Some("Any update?"));
    assert_eq!(comment.added_by.unwrap().user_id, "me@ibm.com");
}

#[tokio::test]
async fn test_watchlist_add_and_remove() {
    let mock_server = MockServer::start().await;
    let watcher = json!({ "realm": "IBMid", "user_id": "w@ibm.com" });

    Mock::given(method("PUT"))
        .and(path("/cases/CS0001/watchlist"))
        .and(body_json(json!({ "watchlist": [watcher.clone()] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "added": [watcher.clone()],
            "failed": []
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/cases/CS0001/watchlist"))
        .and(body_json(json!({ "watchlist": [watcher.clone()] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "watchlist": [] })))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let users = vec![User::new(User::REALM_IBMID, "w@ibm.com")];

    let added = service
        .add_watchlist(&AddWatchlistOptions::new("CS0001").watchlist(users.clone()))
        .await
        .unwrap()
        .result;
    assert_eq!(added.added, users);
    assert!(added.failed.is_empty());

    let remaining = service
        .remove_watchlist(&RemoveWatchlistOptions::new("CS0001").watchlist(users))
        .await
        .unwrap()
        .result;
    assert!(remaining.watchlist.is_empty());
}

#[tokio::test]
async fn test_add_resource() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/cases/CS0001/resources"))
        .and(body_json(json!({
            "crn": "crn:v1:bluemix:public:kms:us-south:a/1::",
            "note": "primary key store"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "crn": "crn:v1:bluemix:public:kms:us-south:a/1::",
            "name": "kms-prod",
            "type": "service"
        })))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let resource = service
        .add_resource(
            &AddResourceOptions::new("CS0001")
                .crn("crn:v1:bluemix:public:kms:us-south:a/1::")
                .note("primary key store"),
        )
        .await
        .unwrap()
        .result;
    assert_eq!(resource.name.as_deref(), Some("kms-prod"));
    assert_eq!(resource.resource_type.as_deref(), Some("service"));
}

// ============================================================================
// Attachments
// ============================================================================

#[tokio::test]
async fn test_upload_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/cases/CS0001/attachments"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"trace.log\""))
        .and(body_string_contains("stack trace"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "att-1",
            "filename": "trace.log",
            "size_in_bytes": 11
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let file = FileWithMetadata::new(&b"stack trace"[..])
        .filename("trace.log")
        .content_type("text/plain");

    let attachment = service
        .upload_file(&UploadFileOptions::new("CS0001", vec![file]))
        .await
        .unwrap()
        .result;
    assert_eq!(attachment.id.as_deref(), Some("att-1"));
    assert_eq!(attachment.size_in_bytes, Some(11));
}

#[tokio::test]
async fn test_upload_requires_file() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);

    let err = service
        .upload_file(&UploadFileOptions::new("CS0001", vec![]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation { .. }));
}

#[tokio::test]
async fn test_download_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cases/CS0001/attachments/att-1"))
        .and(header("Accept", "application/octet-stream"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/octet-stream")
                .set_body_bytes(b"\x00\x01binary".to_vec()),
        )
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let response = service
        .download_file(&DownloadFileOptions::new("CS0001", "att-1"))
        .await
        .unwrap();
    assert_eq!(&response.result[..], b"\x00\x01binary");
}

#[tokio::test]
async fn test_delete_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/cases/CS0001/attachments/att-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "attachments": [{ "id": "att-2", "filename": "other.txt" }]
        })))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let list = service
        .delete_file(&DeleteFileOptions::new("CS0001", "att-1"))
        .await
        .unwrap()
        .result;
    assert_eq!(list.attachments.len(), 1);
    assert_eq!(list.attachments[0].id.as_deref(), Some("att-2"));
}

// ============================================================================
// Status payloads
// ============================================================================

#[test]
fn test_status_payload_serialization() {
    assert_eq!(
        serde_json::to_value(StatusPayload::accept(None)).unwrap(),
        json!({ "action": "accept" })
    );
    assert_eq!(
        serde_json::to_value(StatusPayload::unresolve("still broken")).unwrap(),
        json!({ "action": "unresolve", "comment": "still broken" })
    );
    assert_eq!(
        serde_json::to_value(StatusPayload::resolve(8, None)).unwrap(),
        json!({ "action": "resolve", "resolution_code": 8 })
    );
}

#[test]
fn test_status_payload_decodes_variants() {
    let payload: StatusPayload =
        serde_json::from_value(json!({ "action": "resolve", "resolution_code": 3 })).unwrap();
    assert_eq!(payload, StatusPayload::resolve(3, None));
    assert_eq!(payload.action(), StatusPayload::ACTION_RESOLVE);

    let payload: StatusPayload =
        serde_json::from_value(json!({ "action": "accept", "comment": "thanks" })).unwrap();
    assert_eq!(payload, StatusPayload::accept(Some("thanks".to_string())));
}

#[test]
fn test_status_payload_missing_discriminator() {
    let err = StatusPayload::from_value(&json!({ "comment": "x" })).unwrap_err();
    match err {
        Error::Discriminator { property, message } => {
            assert_eq!(property, "action");
            assert_eq!(message, "required discriminator property 'action' not found");
        }
        other => panic!("Expected Discriminator, got {other:?}"),
    }

    let err = serde_json::from_value::<StatusPayload>(json!({ "action": "" })).unwrap_err();
    assert!(err.to_string().contains("required discriminator property 'action' not found"));
}

#[test]
fn test_status_payload_unknown_discriminator() {
    let err = StatusPayload::from_value(&json!({ "action": "escalate" })).unwrap_err();
    match err {
        Error::UnrecognizedVariant { property, value } => {
            assert_eq!(property, "action");
            assert_eq!(value, "escalate");
        }
        other => panic!("Expected UnrecognizedVariant, got {other:?}"),
    }
}

#[test]
fn test_status_payload_variant_fields_required() {
    assert!(StatusPayload::from_value(&json!({ "action": "resolve" })).is_err());
    assert!(StatusPayload::from_value(&json!({ "action": "unresolve" })).is_err());
}

#[test]
fn test_resolution_code_range() {
    assert_eq!(ResolutionCode::try_from(8).unwrap(), ResolutionCode::SolvedBySupport);
    assert_eq!(i64::from(ResolutionCode::DefectFound), 2);
    assert!(ResolutionCode::try_from(0).is_err());
    assert!(ResolutionCode::try_from(9).is_err());
}

// ============================================================================
// Models
// ============================================================================

#[test]
fn test_case_list_next_offset() {
    let list: CaseList = serde_json::from_value(json!({
        "next": { "href": "https://support-center.cloud.ibm.com/case-management/v1/cases?offset=25" },
        "cases": []
    }))
    .unwrap();
    assert_eq!(list.get_next_offset().unwrap(), Some(25));

    let list: CaseList = serde_json::from_value(json!({
        "next": { "href": "ibm.com?offset=tiger" },
        "cases": []
    }))
    .unwrap();
    assert!(matches!(list.next_offset(), Err(Error::CursorParse { .. })));
}

#[test]
fn test_case_serialization_omits_empty() {
    let case = Case {
        number: Some("CS1".to_string()),
        ..Case::default()
    };
    assert_eq!(serde_json::to_value(&case).unwrap(), json!({ "number": "CS1" }));
}
