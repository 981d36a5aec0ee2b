//! Teacher membership view tests
//!
//! Covers:
//! - GET /api/v1/hod/teachers/{teacher_id}/departments
//! - DepartmentMembershipItem serialization
//! - Single-primary shape of the membership list

use serde_json::Value;

use smis_server::domain::assignment::dto::{
    DepartmentMembershipItem, SuccessTeacherDepartmentsResponse,
};

#[test]
fn should_serialize_membership_item_in_camel_case() {
    // Arrange
    let item = DepartmentMembershipItem {
        department_id: 2,
        name: "Mathematics".to_string(),
        code: "MATH".to_string(),
        is_primary: false,
    };

    // Act
    let json = serde_json::to_string(&item).unwrap();
    let parsed: Value = serde_json::from_str(&json).unwrap();

    // Assert
    assert_eq!(parsed["departmentId"], 2);
    assert_eq!(parsed["name"], "Mathematics");
    assert_eq!(parsed["code"], "MATH");
    assert_eq!(parsed["isPrimary"], false);
    assert!(parsed.get("department_id").is_none());
    assert!(parsed.get("is_primary").is_none());
}

#[test]
fn should_serialize_single_membership_without_primary() {
    // Arrange - teacher 7 assigned to department 2, setPrimary=false
    let result = vec![DepartmentMembershipItem {
        department_id: 2,
        name: "Mathematics".to_string(),
        code: "MATH".to_string(),
        is_primary: false,
    }];

    // Act
    let parsed: Value = serde_json::to_value(&result).unwrap();

    // Assert
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["departmentId"], 2);
    assert_eq!(items[0]["isPrimary"], false);
}

#[test]
fn should_flag_exactly_one_primary_department() {
    // Arrange - teacher 7 in departments 2 and 3, 3 set primary last
    let result = vec![
        DepartmentMembershipItem {
            department_id: 2,
            name: "Mathematics".to_string(),
            code: "MATH".to_string(),
            is_primary: false,
        },
        DepartmentMembershipItem {
            department_id: 3,
            name: "Physics".to_string(),
            code: "PHY".to_string(),
            is_primary: true,
        },
    ];

    // Act
    let parsed: Value = serde_json::to_value(&result).unwrap();

    // Assert - both memberships present, only department 3 primary
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 2);
    let primary_count = items
        .iter()
        .filter(|i| i["isPrimary"] == true)
        .count();
    assert_eq!(primary_count, 1);
    assert_eq!(items[1]["departmentId"], 3);
    assert_eq!(items[1]["isPrimary"], true);
}

#[test]
fn should_serialize_empty_membership_list() {
    let response = SuccessTeacherDepartmentsResponse {
        is_success: true,
        code: "COMMON200".to_string(),
        message: "Success.".to_string(),
        result: vec![],
    };

    let json = serde_json::to_string(&response).unwrap();
    let parsed: Value = serde_json::from_str(&json).unwrap();

    assert!(json.contains("\"result\":[]"));
    assert_eq!(parsed["isSuccess"], true);
    assert_eq!(parsed["code"], "COMMON200");
}
