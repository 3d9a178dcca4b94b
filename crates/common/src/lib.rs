pub mod env;
pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn api_message_serializes_success_ack() {
        let m = types::ApiMessage::ok("deleted");
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "deleted");
    }
}
