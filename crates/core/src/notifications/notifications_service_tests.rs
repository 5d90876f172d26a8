#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result};
    use crate::goals::{Goal, GoalRepositoryTrait, GoalStatus, GoalUpdate, NewGoal};
    use crate::notifications::{
        ChatSender, EmailSender, NotificationService, NotificationServiceTrait,
    };
    use crate::settings::{SettingsRepositoryTrait, SettingsUpdate, UserSettings};
    use crate::transactions::{
        NewTransactionRow, Transaction, TransactionKind, TransactionRepositoryTrait,
        TransactionUpdate,
    };
    use crate::users::{User, UserRepositoryTrait};
    use async_trait::async_trait;
    use chrono::{Days, NaiveDate, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // --- Mock UserRepository ---
    struct MockUserRepository {
        users: Vec<User>,
    }

    impl UserRepositoryTrait for MockUserRepository {
        fn get_user(&self, user_id: &str) -> Result<User> {
            self.users
                .iter()
                .find(|u| u.id == user_id)
                .cloned()
                .ok_or_else(|| Error::Unexpected("User not found".to_string()))
        }

        fn list_users(&self) -> Result<Vec<User>> {
            Ok(self.users.clone())
        }
    }

    // --- Mock SettingsRepository ---
    struct MockSettingsRepository {
        settings: HashMap<String, UserSettings>,
        failing_users: Vec<String>,
    }

    impl MockSettingsRepository {
        fn new() -> Self {
            Self {
                settings: HashMap::new(),
                failing_users: Vec::new(),
            }
        }

        fn with(mut self, settings: UserSettings) -> Self {
            self.settings.insert(settings.user_id.clone(), settings);
            self
        }
    }

    #[async_trait]
    impl SettingsRepositoryTrait for MockSettingsRepository {
        fn get_settings(&self, user_id: &str) -> Result<UserSettings> {
            if self.failing_users.iter().any(|u| u == user_id) {
                return Err(Error::Unexpected("settings store down".to_string()));
            }
            Ok(self
                .settings
                .get(user_id)
                .cloned()
                .unwrap_or_else(|| UserSettings::default_for(user_id)))
        }

        async fn update_settings(&self, _user_id: &str, _update: SettingsUpdate) -> Result<()> {
            unimplemented!()
        }

        async fn set_telegram_chat(&self, _user_id: &str, _chat_id: &str) -> Result<()> {
            unimplemented!()
        }

        async fn clear_telegram_chat(&self, _user_id: &str) -> Result<()> {
            unimplemented!()
        }

        async fn insert_link_token(&self, _user_id: &str, _token: &str) -> Result<()> {
            unimplemented!()
        }

        async fn consume_link_token(&self, _token: &str) -> Result<String> {
            unimplemented!()
        }
    }

    // --- Mock GoalRepository ---
    struct MockGoalRepository {
        goals: Vec<Goal>,
    }

    #[async_trait]
    impl GoalRepositoryTrait for MockGoalRepository {
        fn get_goal(&self, _user_id: &str, _goal_id: &str) -> Result<Goal> {
            unimplemented!()
        }

        fn load_goals(&self, _user_id: &str) -> Result<Vec<Goal>> {
            unimplemented!()
        }

        fn load_in_progress_goals(&self) -> Result<Vec<Goal>> {
            Ok(self
                .goals
                .iter()
                .filter(|g| g.status == GoalStatus::InProgress)
                .cloned()
                .collect())
        }

        async fn insert_new_goal(&self, _user_id: &str, _new_goal: NewGoal) -> Result<Goal> {
            unimplemented!()
        }

        async fn update_goal(&self, _user_id: &str, _goal_update: GoalUpdate) -> Result<Goal> {
            unimplemented!()
        }

        async fn delete_goal(&self, _user_id: &str, _goal_id: &str) -> Result<usize> {
            unimplemented!()
        }
    }

    // --- Mock TransactionRepository ---
    struct MockTransactionRepository {
        latest: HashMap<String, Transaction>,
    }

    #[async_trait]
    impl TransactionRepositoryTrait for MockTransactionRepository {
        fn get_transaction(&self, _user_id: &str, _transaction_id: &str) -> Result<Transaction> {
            unimplemented!()
        }

        fn list_transactions(&self, _user_id: &str) -> Result<Vec<Transaction>> {
            unimplemented!()
        }

        fn latest_for_user(&self, user_id: &str) -> Result<Option<Transaction>> {
            Ok(self.latest.get(user_id).cloned())
        }

        async fn insert_batch(&self, _rows: Vec<NewTransactionRow>) -> Result<Vec<Transaction>> {
            unimplemented!()
        }

        async fn update_transaction(
            &self,
            _user_id: &str,
            _update: TransactionUpdate,
        ) -> Result<Transaction> {
            unimplemented!()
        }

        async fn delete_transaction(&self, _user_id: &str, _transaction_id: &str) -> Result<usize> {
            unimplemented!()
        }

        async fn delete_batch(&self, _user_id: &str, _batch_id: &str) -> Result<usize> {
            unimplemented!()
        }
    }

    // --- Mock channels ---
    struct MockEmailSender {
        sent: Arc<Mutex<Vec<(String, String, String)>>>,
        fail: bool,
    }

    impl MockEmailSender {
        fn new() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl EmailSender for MockEmailSender {
        async fn send(&self, to: &str, subject: &str, body: &str) -> Result<()> {
            if self.fail {
                return Err(Error::Unexpected("smtp relay down".to_string()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    struct MockChatSender {
        sent: Arc<Mutex<Vec<(String, String)>>>,
        succeed: bool,
    }

    impl MockChatSender {
        fn new() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                succeed: true,
            }
        }

        fn failing() -> Self {
            Self {
                sent: Arc::new(Mutex::new(Vec::new())),
                succeed: false,
            }
        }
    }

    #[async_trait]
    impl ChatSender for MockChatSender {
        async fn send(&self, chat_id: &str, text: &str) -> bool {
            self.sent
                .lock()
                .unwrap()
                .push((chat_id.to_string(), text.to_string()));
            self.succeed
        }
    }

    // --- Fixtures ---
    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            name: None,
            created_at: Utc::now(),
        }
    }

    fn goal(user_id: &str, target: Decimal, current: Decimal) -> Goal {
        Goal {
            id: format!("goal-{}", user_id),
            user_id: user_id.to_string(),
            name: "New car".to_string(),
            target_amount: target,
            current_amount: current,
            deadline: None,
            status: GoalStatus::InProgress,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn transaction_on(user_id: &str, date: NaiveDate) -> Transaction {
        Transaction {
            id: format!("tx-{}", user_id),
            user_id: user_id.to_string(),
            kind: TransactionKind::Expense,
            amount: dec!(10),
            category_id: None,
            group_id: None,
            description: Some("coffee".to_string()),
            date,
            is_fixed: false,
            is_installment: false,
            is_recurring: false,
            is_active: true,
            installment_number: None,
            installment_count: None,
            batch_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn email_only(user_id: &str) -> UserSettings {
        let mut s = UserSettings::default_for(user_id);
        s.email_notifications = true;
        s.telegram_enabled = false;
        s
    }

    fn chat_only(user_id: &str) -> UserSettings {
        let mut s = UserSettings::default_for(user_id);
        s.email_notifications = false;
        s.telegram_enabled = true;
        s.telegram_chat_id = Some(format!("chat-{}", user_id));
        s
    }

    struct Harness {
        service: NotificationService,
        email: Arc<MockEmailSender>,
        chat: Arc<MockChatSender>,
    }

    fn harness(
        users: Vec<User>,
        settings: MockSettingsRepository,
        goals: Vec<Goal>,
        latest: HashMap<String, Transaction>,
        email: MockEmailSender,
        chat: MockChatSender,
    ) -> Harness {
        let email = Arc::new(email);
        let chat = Arc::new(chat);
        let service = NotificationService::new(
            Arc::new(MockUserRepository { users }),
            Arc::new(settings),
            Arc::new(MockGoalRepository { goals }),
            Arc::new(MockTransactionRepository { latest }),
            email.clone(),
            chat.clone(),
            2,
        );
        Harness {
            service,
            email,
            chat,
        }
    }

    #[tokio::test]
    async fn goal_sweep_emails_85_percent_goal() {
        let h = harness(
            vec![user("u1")],
            MockSettingsRepository::new().with(email_only("u1")),
            vec![goal("u1", dec!(1000), dec!(850))],
            HashMap::new(),
            MockEmailSender::new(),
            MockChatSender::new(),
        );

        let notified = h.service.check_goal_notifications().await.unwrap();
        assert_eq!(notified, 1);

        let sent = h.email.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (to, _subject, body) = &sent[0];
        assert_eq!(to, "u1@example.com");
        assert!(body.contains("15.00%"));
        assert!(body.contains("150.00"));
        assert!(h.chat.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn goal_sweep_skips_goals_over_threshold() {
        let h = harness(
            vec![user("u1")],
            MockSettingsRepository::new().with(email_only("u1")),
            vec![goal("u1", dec!(1000), dec!(500))],
            HashMap::new(),
            MockEmailSender::new(),
            MockChatSender::new(),
        );

        assert_eq!(h.service.check_goal_notifications().await.unwrap(), 0);
        assert!(h.email.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn channels_are_selected_independently() {
        let h = harness(
            vec![user("u1")],
            MockSettingsRepository::new().with(chat_only("u1")),
            vec![goal("u1", dec!(1000), dec!(990))],
            HashMap::new(),
            MockEmailSender::new(),
            MockChatSender::new(),
        );

        assert_eq!(h.service.check_goal_notifications().await.unwrap(), 1);
        assert!(h.email.sent.lock().unwrap().is_empty());
        assert_eq!(h.chat.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn email_failure_does_not_block_chat() {
        let mut settings = UserSettings::default_for("u1");
        settings.email_notifications = true;
        settings.telegram_enabled = true;
        settings.telegram_chat_id = Some("chat-1".to_string());

        let h = harness(
            vec![user("u1")],
            MockSettingsRepository::new().with(settings),
            vec![goal("u1", dec!(1000), dec!(990))],
            HashMap::new(),
            MockEmailSender::failing(),
            MockChatSender::new(),
        );

        let report = h
            .service
            .dispatch(
                "u1",
                &crate::notifications::NotificationMessage {
                    subject: "s".to_string(),
                    body: "b".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(report.email_attempted);
        assert!(!report.email_delivered);
        assert!(report.chat_attempted);
        assert!(report.chat_delivered);
        assert_eq!(h.chat.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn chat_failure_is_swallowed() {
        let h = harness(
            vec![user("u1")],
            MockSettingsRepository::new().with(chat_only("u1")),
            vec![],
            HashMap::new(),
            MockEmailSender::new(),
            MockChatSender::failing(),
        );

        let report = h
            .service
            .dispatch(
                "u1",
                &crate::notifications::NotificationMessage {
                    subject: "s".to_string(),
                    body: "b".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(report.chat_attempted);
        assert!(!report.chat_delivered);
    }

    #[tokio::test]
    async fn inactivity_sweep_honors_strict_cutoff() {
        let today = Utc::now().date_naive();
        let mut latest = HashMap::new();
        // Exactly at the threshold: must not fire.
        latest.insert(
            "u1".to_string(),
            transaction_on("u1", today.checked_sub_days(Days::new(2)).unwrap()),
        );
        // One day past the threshold: fires.
        latest.insert(
            "u2".to_string(),
            transaction_on("u2", today.checked_sub_days(Days::new(3)).unwrap()),
        );

        let h = harness(
            vec![user("u1"), user("u2"), user("u3")],
            MockSettingsRepository::new()
                .with(email_only("u1"))
                .with(email_only("u2"))
                .with(email_only("u3")),
            vec![],
            latest, // u3 has no transactions at all
            MockEmailSender::new(),
            MockChatSender::new(),
        );

        let notified = h.service.check_inactive_users().await.unwrap();
        assert_eq!(notified, 1);

        let sent = h.email.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "u2@example.com");
    }

    #[tokio::test]
    async fn inactivity_sweep_skips_users_without_channels() {
        let today = Utc::now().date_naive();
        let mut settings = UserSettings::default_for("u1");
        settings.email_notifications = false;
        settings.telegram_enabled = false;

        let mut latest = HashMap::new();
        latest.insert(
            "u1".to_string(),
            transaction_on("u1", today.checked_sub_days(Days::new(10)).unwrap()),
        );

        let h = harness(
            vec![user("u1")],
            MockSettingsRepository::new().with(settings),
            vec![],
            latest,
            MockEmailSender::new(),
            MockChatSender::new(),
        );

        assert_eq!(h.service.check_inactive_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn sweep_continues_past_failing_candidates() {
        let today = Utc::now().date_naive();
        let mut latest = HashMap::new();
        latest.insert(
            "u1".to_string(),
            transaction_on("u1", today.checked_sub_days(Days::new(5)).unwrap()),
        );
        latest.insert(
            "u2".to_string(),
            transaction_on("u2", today.checked_sub_days(Days::new(5)).unwrap()),
        );

        let mut settings = MockSettingsRepository::new().with(email_only("u2"));
        settings.failing_users.push("u1".to_string());

        let h = harness(
            vec![user("u1"), user("u2")],
            settings,
            vec![],
            latest,
            MockEmailSender::new(),
            MockChatSender::new(),
        );

        // u1's settings lookup fails; u2 is still notified.
        assert_eq!(h.service.check_inactive_users().await.unwrap(), 1);
        assert_eq!(h.email.sent.lock().unwrap()[0].0, "u2@example.com");
    }

    #[tokio::test]
    async fn recurring_rows_notify_but_installment_rows_do_not() {
        let h = harness(
            vec![user("u1")],
            MockSettingsRepository::new().with(email_only("u1")),
            vec![],
            HashMap::new(),
            MockEmailSender::new(),
            MockChatSender::new(),
        );

        let mut recurring = transaction_on("u1", NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        recurring.is_recurring = true;
        recurring.description = None;
        let report = h
            .service
            .notify_recurring_created("u1", &recurring)
            .await
            .unwrap();
        assert!(report.email_attempted);
        {
            let sent = h.email.sent.lock().unwrap();
            assert!(sent[0].2.contains("(no description)"));
            assert!(sent[0].2.contains("10.00"));
        }

        let mut installment = transaction_on("u1", NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
        installment.is_installment = true;
        installment.installment_number = Some(1);
        installment.installment_count = Some(3);
        let report = h
            .service
            .notify_recurring_created("u1", &installment)
            .await
            .unwrap();
        assert!(!report.attempted_any());
        assert_eq!(h.email.sent.lock().unwrap().len(), 1);
    }
}
