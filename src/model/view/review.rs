use crate::model::{
    api::user::User,
    common::user::{Role, VerificationStatus},
};

/// The admin panel's KYC review queue: voter accounts still awaiting a
/// decision, in the order the server listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQueue {
    pending: Vec<User>,
}

impl ReviewQueue {
    pub fn new(users: Vec<User>) -> Self {
        let pending = users
            .into_iter()
            .filter(|user| {
                user.role == Role::Voter && user.verification_status == VerificationStatus::Pending
            })
            .collect();
        Self { pending }
    }

    pub fn pending(&self) -> &[User] {
        &self.pending
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.pending.iter().any(|user| user.id == user_id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_voters_are_queued() {
        let mut pending_admin = User::admin_example();
        pending_admin.verification_status = VerificationStatus::Pending;
        let mut second = User::pending_example();
        second.id = "u-pending-2".to_string();

        let queue = ReviewQueue::new(vec![
            User::voter_example(),
            User::pending_example(),
            User::rejected_example(),
            pending_admin,
            second,
        ]);
        let ids = queue
            .pending()
            .iter()
            .map(|u| u.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["u-pending", "u-pending-2"]);
        assert!(queue.contains("u-pending"));
        assert!(!queue.contains("u-voter"));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn empty_queue() {
        assert!(ReviewQueue::new(vec![User::voter_example()]).is_empty());
    }
}
