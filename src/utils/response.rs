use serde::Serialize;

use super::Paginate;

/// Unified API response envelope.
///
/// Three shapes reach the wire, told apart by which optionals are set:
/// message-only, single payload, and paged list. Absent fields are omitted
/// from the JSON rather than serialized as null.
#[derive(Debug, Serialize)]
pub struct ResponseData<T: Serialize> {
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paginate: Option<Paginate>,
}

impl<T: Serialize> ResponseData<T> {
    /// Envelope carrying a single payload.
    pub fn with_data(status_code: u16, message: &str, data: T) -> Self {
        Self {
            status_code,
            message: message.to_string(),
            data: Some(data),
            paginate: None,
        }
    }

    /// Envelope carrying a page of rows plus its pagination metadata.
    pub fn with_pagination(status_code: u16, message: &str, data: T, paginate: Paginate) -> Self {
        Self {
            status_code,
            message: message.to_string(),
            data: Some(data),
            paginate: Some(paginate),
        }
    }
}

impl ResponseData<()> {
    /// Envelope with no payload, used for acknowledgements and errors.
    pub fn message(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            message: message.to_string(),
            data: None,
            paginate: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_only_shape() {
        let v = serde_json::to_value(ResponseData::message(204, "Deleted")).unwrap();
        assert_eq!(v, json!({ "status_code": 204, "message": "Deleted" }));
    }

    #[test]
    fn single_payload_shape() {
        let v = serde_json::to_value(ResponseData::with_data(
            201,
            "Created",
            json!({ "id": 7 }),
        ))
        .unwrap();
        assert_eq!(
            v,
            json!({ "status_code": 201, "message": "Created", "data": { "id": 7 } })
        );
    }

    #[test]
    fn paged_list_shape() {
        let paginate = Paginate::new(20, 2, 95);
        let v = serde_json::to_value(ResponseData::with_pagination(
            200,
            "OK",
            vec![json!({ "id": 1 }), json!({ "id": 2 })],
            paginate,
        ))
        .unwrap();
        assert_eq!(
            v,
            json!({
                "status_code": 200,
                "message": "OK",
                "data": [{ "id": 1 }, { "id": 2 }],
                "paginate": {
                    "limit": 20,
                    "page": 2,
                    "total_page": 5,
                    "total_data": 95,
                    "next_page": 3,
                    "prev_page": 1
                }
            })
        );
    }

    #[test]
    fn empty_page_keeps_data_and_paginate() {
        let paginate = Paginate::new(10, 1, 0);
        let v = serde_json::to_value(ResponseData::with_pagination(
            200,
            "OK",
            Vec::<serde_json::Value>::new(),
            paginate,
        ))
        .unwrap();
        assert_eq!(
            v,
            json!({
                "status_code": 200,
                "message": "OK",
                "data": [],
                "paginate": { "limit": 10, "page": 1, "total_page": 0, "total_data": 0 }
            })
        );
    }
}
