use serde::Serialize;

use crate::github::GithubUser;

/// Flat, normalized view of a user's contribution statistics. Computed
/// once per request, never mutated.
#[derive(Debug, PartialEq, Serialize)]
pub struct Metrics {
    pub username: Option<String>,
    pub name: Option<String>,
    pub commits: u64,
    pub reviews: u64,
    #[serde(rename = "discussionComments")]
    pub discussion_comments: u64,
    #[serde(rename = "closedIssues")]
    pub closed_issues: u64,
    pub stars: u64,
    /// True when more repositories existed beyond the fetched page, so
    /// `stars` is a lower bound on the user's true total.
    #[serde(rename = "repositoriesTruncated")]
    pub repositories_truncated: bool,
}

/// Flatten the nested upstream user object into `Metrics`. A field
/// missing at any level of its path yields 0 (or false), never an error.
pub fn map_metrics(user: &GithubUser) -> Metrics {
    let commits = user
        .contributions_collection
        .as_ref()
        .and_then(|c| c.total_commit_contributions)
        .unwrap_or(0);
    let reviews = user
        .contributions_collection
        .as_ref()
        .and_then(|c| c.total_pull_request_review_contributions)
        .unwrap_or(0);
    let discussion_comments = user
        .contributions_collection
        .as_ref()
        .and_then(|c| c.total_repository_discussion_comments)
        .unwrap_or(0);
    let closed_issues = user
        .issues
        .as_ref()
        .and_then(|i| i.total_count)
        .unwrap_or(0);

    let stars = user
        .repositories
        .as_ref()
        .and_then(|r| r.nodes.as_ref())
        .map(|nodes| {
            nodes
                .iter()
                .map(|n| n.stargazer_count.unwrap_or(0))
                .sum::<u64>()
        })
        .unwrap_or(0);

    let repositories_truncated = user
        .repositories
        .as_ref()
        .and_then(|r| r.page_info.as_ref())
        .and_then(|p| p.has_next_page)
        .unwrap_or(false);

    Metrics {
        username: user.login.clone(),
        name: user.name.clone(),
        commits,
        reviews,
        discussion_comments,
        closed_issues,
        stars,
        repositories_truncated,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::map_metrics;
    use crate::github::GithubUser;

    fn user(value: serde_json::Value) -> GithubUser {
        serde_json::from_value(value).expect("user payload")
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let m = map_metrics(&user(json!({})));
        assert_eq!(m.username, None);
        assert_eq!(m.name, None);
        assert_eq!(m.commits, 0);
        assert_eq!(m.reviews, 0);
        assert_eq!(m.discussion_comments, 0);
        assert_eq!(m.closed_issues, 0);
        assert_eq!(m.stars, 0);
        assert!(!m.repositories_truncated);
    }

    #[test]
    fn partial_contributions_default_per_field() {
        let m = map_metrics(&user(json!({
            "login": "alice",
            "contributionsCollection": { "totalCommitContributions": 4 }
        })));
        assert_eq!(m.commits, 4);
        assert_eq!(m.reviews, 0);
        assert_eq!(m.discussion_comments, 0);
    }

    #[test]
    fn null_nested_objects_are_treated_as_absent() {
        let m = map_metrics(&user(json!({
            "contributionsCollection": null,
            "issues": null,
            "repositories": null
        })));
        assert_eq!(m.commits, 0);
        assert_eq!(m.closed_issues, 0);
        assert_eq!(m.stars, 0);
        assert!(!m.repositories_truncated);
    }

    #[test]
    fn star_sum_is_order_independent() {
        let ascending = map_metrics(&user(json!({
            "repositories": { "nodes": [
                { "name": "a", "stargazerCount": 1 },
                { "name": "b", "stargazerCount": 9 },
                { "name": "c", "stargazerCount": 12 }
            ]}
        })));
        let descending = map_metrics(&user(json!({
            "repositories": { "nodes": [
                { "name": "c", "stargazerCount": 12 },
                { "name": "b", "stargazerCount": 9 },
                { "name": "a", "stargazerCount": 1 }
            ]}
        })));
        assert_eq!(ascending.stars, 22);
        assert_eq!(descending.stars, 22);
    }

    #[test]
    fn node_without_star_count_adds_zero() {
        let m = map_metrics(&user(json!({
            "repositories": { "nodes": [
                { "name": "a", "stargazerCount": 3 },
                { "name": "b" }
            ]}
        })));
        assert_eq!(m.stars, 3);
    }

    #[test]
    fn truncation_follows_has_next_page() {
        let absent = map_metrics(&user(json!({ "repositories": { "nodes": [] } })));
        assert!(!absent.repositories_truncated);

        let not_truncated = map_metrics(&user(json!({
            "repositories": { "nodes": [], "pageInfo": { "hasNextPage": false } }
        })));
        assert!(!not_truncated.repositories_truncated);

        let truncated = map_metrics(&user(json!({
            "repositories": { "nodes": [], "pageInfo": { "hasNextPage": true } }
        })));
        assert!(truncated.repositories_truncated);
    }

    #[test]
    fn maps_complete_user() {
        let m = map_metrics(&user(json!({
            "login": "alice",
            "name": "Alice",
            "contributionsCollection": {
                "totalCommitContributions": 5,
                "totalPullRequestReviewContributions": 2,
                "totalRepositoryDiscussionComments": 1
            },
            "issues": { "totalCount": 3 },
            "repositories": {
                "nodes": [
                    { "name": "r1", "stargazerCount": 10 },
                    { "name": "r2", "stargazerCount": 7 }
                ],
                "pageInfo": { "hasNextPage": false }
            }
        })));
        assert_eq!(m.username.as_deref(), Some("alice"));
        assert_eq!(m.name.as_deref(), Some("Alice"));
        assert_eq!(m.commits, 5);
        assert_eq!(m.reviews, 2);
        assert_eq!(m.discussion_comments, 1);
        assert_eq!(m.closed_issues, 3);
        assert_eq!(m.stars, 17);
        assert!(!m.repositories_truncated);
    }
}
