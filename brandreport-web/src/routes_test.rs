//! Tests for the routing system
//!
//! Validates route paths, unknown-path handling and which routes are
//! reserved for anonymous visitors.

#[cfg(test)]
mod tests {
    use crate::guards::{ReturnTo, post_login_destination};
    use crate::routes::MainRoute;
    use strum::IntoEnumIterator;
    use test_case::test_case;
    use yew_router::Routable;

    #[test_case(MainRoute::Login, "/")]
    #[test_case(MainRoute::Register, "/register")]
    #[test_case(MainRoute::Home, "/home")]
    #[test_case(MainRoute::NotFound, "/404")]
    fn route_paths(route: MainRoute, path: &str) {
        assert_eq!(route.to_path(), path);
        assert_eq!(MainRoute::recognize(path), Some(route));
    }

    #[test_case("/reports/123")]
    #[test_case("/home/extra")]
    #[test_case("/admin")]
    fn unknown_paths_fall_through_to_not_found(path: &str) {
        assert_eq!(MainRoute::recognize(path), Some(MainRoute::NotFound));
    }

    #[test]
    fn only_login_and_register_are_guest_only() {
        let guest_only: Vec<_> = MainRoute::iter().filter(MainRoute::is_guest_only).collect();
        assert_eq!(guest_only, vec![MainRoute::Login, MainRoute::Register]);
    }

    #[test]
    fn return_to_home_round_trips() {
        let captured = ReturnTo(MainRoute::Home);
        assert_eq!(post_login_destination(Some(&captured)), MainRoute::Home);
    }
}
