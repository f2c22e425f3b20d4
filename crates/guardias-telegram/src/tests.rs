/// Deserialization tests for Bot API payloads, using shapes taken from the
/// Telegram documentation.
#[cfg(test)]
mod unit {
    use crate::types::{ApiResponse, Update, User};

    #[test]
    fn parse_private_message_update() {
        let json = r#"{
            "update_id": 100,
            "message": {
                "message_id": 5,
                "date": 1735084800,
                "from": {"id": 1, "is_bot": false, "first_name": "Juan", "username": "juanito"},
                "chat": {"id": 1, "type": "private", "first_name": "Juan"},
                "text": "/agregar Juan 2024-12-25",
                "entities": [{"offset": 0, "length": 8, "type": "bot_command"}]
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert_eq!(update.update_id, 100);
        let msg = update.message.unwrap();
        assert_eq!(msg.chat.kind, "private");
        assert_eq!(msg.from.unwrap().username.as_deref(), Some("juanito"));
        assert_eq!(msg.text.as_deref(), Some("/agregar Juan 2024-12-25"));
    }

    #[test]
    fn parse_message_without_text() {
        let json = r#"{
            "update_id": 101,
            "message": {
                "message_id": 6,
                "date": 0,
                "chat": {"id": -100, "type": "supergroup", "title": "Guardias"},
                "photo": []
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        let msg = update.message.unwrap();
        assert!(msg.text.is_none());
        assert!(msg.from.is_none());
    }

    #[test]
    fn parse_non_message_update() {
        let json = r#"{"update_id": 102, "callback_query": {"id": "x"}}"#;
        let update: Update = serde_json::from_str(json).unwrap();
        assert!(update.message.is_none());
    }

    #[test]
    fn parse_error_envelope() {
        let json = r#"{"ok": false, "error_code": 409, "description": "Conflict: terminated by other getUpdates request"}"#;
        let resp: ApiResponse<Vec<Update>> = serde_json::from_str(json).unwrap();
        assert!(!resp.ok);
        assert!(resp.result.is_none());
        assert_eq!(resp.error_code, Some(409));
    }

    #[test]
    fn parse_get_me_envelope() {
        let json = r#"{"ok": true, "result": {"id": 7, "is_bot": true, "first_name": "Guardias", "username": "guardias_bot"}}"#;
        let resp: ApiResponse<User> = serde_json::from_str(json).unwrap();
        let me = resp.result.unwrap();
        assert!(me.is_bot);
        assert_eq!(me.username.as_deref(), Some("guardias_bot"));
    }
}
