//! Identifier generation for plans and tasks.

use jiff::Timestamp;

/// New plan identifier of the form `plan_<unix-millis>_<random>`.
pub fn plan_id() -> String {
    generate("plan")
}

/// New task identifier of the form `task_<unix-millis>_<random>`.
pub fn task_id() -> String {
    generate("task")
}

fn generate(prefix: &str) -> String {
    let millis = Timestamp::now().as_millisecond();
    let suffix = rand::random::<u32>();
    format!("{prefix}_{millis}_{suffix:08x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_shape() {
        let id = task_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "task");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 8);
        assert!(plan_id().starts_with("plan_"));
    }

    #[test]
    fn test_ids_are_distinct() {
        let ids: std::collections::HashSet<String> = (0..200).map(|_| task_id()).collect();
        assert_eq!(ids.len(), 200);
    }
}
