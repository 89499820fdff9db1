//! Integration tests for the installation lifecycle

#[cfg(test)]
mod tests {
    use amo_config::UsageErrorPolicy;
    use amo_errors::LifecycleError;
    use amo_events::{AppEvent, InstallationEvent};
    use amo_installations::*;
    use amo_types::{DownloadProgress, Guid, InstallErrorCode, InstallStatus, Percent};
    use proptest::prelude::*;

    fn guid(value: &str) -> Guid {
        Guid::new(value).unwrap()
    }

    fn tracked(status: InstallStatus, guids: &[&str]) -> Installations {
        let mut table = Installations::new();
        for value in guids {
            table
                .apply(&InstallAction::SetInstallState(InstallState::new(
                    guid(value),
                    status,
                )))
                .unwrap();
        }
        table
    }

    #[test]
    fn test_install_then_corrupt_file() {
        let mut table = tracked(InstallStatus::Uninstalled, &["ext-1"]);
        assert_eq!(selectors::status(&table, "ext-1"), InstallStatus::Uninstalled);
        assert!(selectors::can_uninstall(&table, "ext-1"));

        table = reduce(&table, &InstallAction::start_download(guid("ext-1"))).unwrap();
        assert_eq!(selectors::status(&table, "ext-1"), InstallStatus::Downloading);
        assert_eq!(
            selectors::download_progress(&table, "ext-1"),
            Some(DownloadProgress::Percent(Percent::ZERO))
        );

        table = reduce(
            &table,
            &InstallAction::download_progress(guid("ext-1"), 42).unwrap(),
        )
        .unwrap();
        assert_eq!(selectors::status(&table, "ext-1"), InstallStatus::Downloading);
        assert_eq!(
            selectors::download_progress(&table, "ext-1")
                .map(DownloadProgress::rendered_percent),
            Some(42)
        );

        table = reduce(
            &table,
            &InstallAction::install_error(guid("ext-1"), "ERROR_CORRUPT_FILE"),
        )
        .unwrap();
        let record = selectors::addon(&table, "ext-1").unwrap();
        assert_eq!(record.status, InstallStatus::Error);
        assert_eq!(record.download_progress, Percent::ZERO);
        assert_eq!(
            selectors::install_error(&table, "ext-1"),
            Some(&InstallErrorCode::CorruptFile)
        );
        assert_eq!(
            error_message(&InstallErrorCode::CorruptFile),
            "Installation aborted because the add-on appears to be corrupt."
        );
    }

    #[test]
    fn test_install_complete_after_download() {
        let mut table = tracked(InstallStatus::Uninstalled, &["ext-1"]);
        table.apply(&InstallAction::start_download(guid("ext-1"))).unwrap();
        table
            .apply(&InstallAction::download_progress(guid("ext-1"), 42).unwrap())
            .unwrap();
        table
            .apply(&InstallAction::install_complete(guid("ext-1")))
            .unwrap();

        assert_eq!(selectors::status(&table, "ext-1"), InstallStatus::Installed);
        assert_eq!(selectors::download_progress(&table, "ext-1"), None);
        assert_eq!(
            selectors::addon(&table, "ext-1").unwrap().download_progress,
            Percent::ZERO
        );
    }

    #[test]
    fn test_every_follow_up_action_needs_a_record() {
        let table = Installations::new();
        let unknown = guid("ext-unknown");
        let actions = [
            InstallAction::start_download(unknown.clone()),
            InstallAction::download_progress(unknown.clone(), 10).unwrap(),
            InstallAction::install_complete(unknown.clone()),
            InstallAction::uninstall_complete(unknown.clone()),
            InstallAction::install_cancelled(unknown.clone()),
            InstallAction::install_error(unknown.clone(), InstallErrorCode::InstallFailed),
        ];

        for action in &actions {
            assert_eq!(
                reduce(&table, action),
                Err(LifecycleError::UnknownAddon {
                    guid: "ext-unknown".into()
                }),
                "{}",
                action.kind()
            );
        }
    }

    #[test]
    fn test_progress_tracked_per_guid() {
        let mut table = tracked(InstallStatus::Uninstalled, &["ext-1", "ext-2"]);
        for value in ["ext-1", "ext-2"] {
            table.apply(&InstallAction::start_download(guid(value))).unwrap();
        }
        table
            .apply(&InstallAction::download_progress(guid("ext-1"), 30).unwrap())
            .unwrap();
        table
            .apply(&InstallAction::download_progress(guid("ext-2"), 70).unwrap())
            .unwrap();
        table
            .apply(&InstallAction::download_progress(guid("ext-1"), 55).unwrap())
            .unwrap();

        assert_eq!(
            selectors::addon(&table, "ext-1").unwrap().download_progress.value(),
            55
        );
        assert_eq!(
            selectors::addon(&table, "ext-2").unwrap().download_progress.value(),
            70
        );
    }

    #[test]
    fn test_overwrite_drops_stale_fields() {
        let mut table = Installations::new();
        table
            .apply(&InstallAction::SetInstallState(
                InstallState::new(guid("ext-1"), InstallStatus::Error)
                    .with_error(InstallErrorCode::DownloadFailed)
                    .with_can_uninstall(false)
                    .with_needs_restart(true)
                    .with_name("Ext One"),
            ))
            .unwrap();
        table
            .apply(&InstallAction::SetInstallState(InstallState::new(
                guid("ext-1"),
                InstallStatus::Enabled,
            )))
            .unwrap();

        let record = selectors::addon(&table, "ext-1").unwrap();
        assert_eq!(record.status, InstallStatus::Enabled);
        assert_eq!(record.error, None);
        assert_eq!(record.name, None);
        assert!(record.can_uninstall);
        assert!(!record.needs_restart);
    }

    #[test]
    fn test_cancel_returns_to_uninstalled() {
        let mut table = tracked(InstallStatus::Downloading, &["ext-1"]);
        table
            .apply(&InstallAction::download_progress(guid("ext-1"), 90).unwrap())
            .unwrap();
        table
            .apply(&InstallAction::install_cancelled(guid("ext-1")))
            .unwrap();

        let record = selectors::addon(&table, "ext-1").unwrap();
        assert_eq!(record.status, InstallStatus::Uninstalled);
        assert_eq!(record.download_progress, Percent::ZERO);
    }

    #[test]
    fn test_store_publishes_changes() {
        let (tx, mut rx) = amo_events::channel();
        let mut store = InstallationStore::new(UsageErrorPolicy::Log).with_events(tx);

        store
            .dispatch(&InstallAction::SetInstallState(InstallState::new(
                guid("ext-1"),
                InstallStatus::Uninstalled,
            )))
            .unwrap();
        store
            .dispatch(&InstallAction::start_download(guid("ext-1")))
            .unwrap();
        store
            .dispatch(&InstallAction::download_progress(guid("ext-1"), 12).unwrap())
            .unwrap();

        let mut events = Vec::new();
        while let Ok(message) = rx.try_recv() {
            if let AppEvent::Installation(event) = message.event {
                events.push(event);
            }
        }

        assert_eq!(events.len(), 3);
        assert!(matches!(
            &events[0],
            InstallationEvent::StateChanged { from: None, to: InstallStatus::Uninstalled, .. }
        ));
        assert!(matches!(
            &events[1],
            InstallationEvent::StateChanged {
                from: Some(InstallStatus::Uninstalled),
                to: InstallStatus::Downloading,
                ..
            }
        ));
        assert!(matches!(
            &events[2],
            InstallationEvent::ProgressUpdated { progress, .. } if progress.value() == 12
        ));
    }

    #[tokio::test]
    async fn test_dispatcher_applies_in_send_order() {
        let (actions, receiver) = action_channel();
        let mut store = InstallationStore::new(UsageErrorPolicy::Log);

        let producer = tokio::spawn(async move {
            let ext = guid("ext-1");
            actions
                .send(InstallAction::SetInstallState(InstallState::new(
                    ext.clone(),
                    InstallStatus::Uninstalled,
                )))
                .unwrap();
            actions.send(InstallAction::start_download(ext.clone())).unwrap();
            for value in [10, 20, 30] {
                actions
                    .send(InstallAction::download_progress(ext.clone(), value).unwrap())
                    .unwrap();
            }
            // rejected: never tracked
            actions
                .send(InstallAction::install_complete(guid("ext-2")))
                .unwrap();
            actions.send(InstallAction::install_complete(ext)).unwrap();
        });

        producer.await.unwrap();
        let applied = run_dispatcher(&mut store, receiver).await;

        assert_eq!(applied, 6);
        assert_eq!(
            selectors::status(store.state(), "ext-1"),
            InstallStatus::Installed
        );
        assert!(!store.state().contains("ext-2"));
    }

    const GUIDS: [&str; 3] = ["a@me.com", "b@me.com", "c@me.com"];

    fn any_action() -> impl Strategy<Value = InstallAction> {
        let status = prop::sample::select(InstallStatus::ALL.to_vec());
        (0..GUIDS.len(), 0u8..7, status, 0i64..=100).prop_map(|(index, kind, status, value)| {
            let target = guid(GUIDS[index]);
            match kind {
                0 => InstallAction::SetInstallState(InstallState::new(target, status)),
                1 => InstallAction::start_download(target),
                2 => InstallAction::download_progress(target, value).unwrap(),
                3 => InstallAction::install_complete(target),
                4 => InstallAction::uninstall_complete(target),
                5 => InstallAction::install_cancelled(target),
                _ => InstallAction::install_error(target, InstallErrorCode::InstallFailed),
            }
        })
    }

    proptest! {
        #[test]
        fn actions_only_touch_their_own_guid(
            actions in prop::collection::vec(any_action(), 0..40),
            last in any_action(),
        ) {
            let mut table = Installations::new();
            for action in &actions {
                let _ = table.apply(action);
            }

            let mut after = table.clone();
            let result = after.apply(&last);

            for other in GUIDS.iter().filter(|value| **value != last.guid().as_str()) {
                prop_assert_eq!(table.get(other), after.get(other));
            }
            if result.is_err() {
                prop_assert_eq!(&after, &table);
            }
        }

        #[test]
        fn cancel_and_error_reset_progress(
            actions in prop::collection::vec(any_action(), 0..40),
            index in 0..GUIDS.len(),
            cancel in any::<bool>(),
        ) {
            let mut table = Installations::new();
            for action in &actions {
                let _ = table.apply(action);
            }
            let target = guid(GUIDS[index]);
            prop_assume!(table.contains(target.as_str()));

            let action = if cancel {
                InstallAction::install_cancelled(target.clone())
            } else {
                InstallAction::install_error(target.clone(), InstallErrorCode::DownloadFailed)
            };
            table.apply(&action).unwrap();

            prop_assert_eq!(
                table.get(target.as_str()).map(|record| record.download_progress),
                Some(Percent::ZERO)
            );
        }

        #[test]
        fn queries_are_repeatable(
            actions in prop::collection::vec(any_action(), 0..40),
            index in 0..GUIDS.len(),
        ) {
            let mut table = Installations::new();
            for action in &actions {
                let _ = table.apply(action);
            }
            let target = GUIDS[index];

            prop_assert_eq!(selectors::status(&table, target), selectors::status(&table, target));
            prop_assert_eq!(
                selectors::download_progress(&table, target),
                selectors::download_progress(&table, target)
            );
            prop_assert_eq!(
                selectors::can_uninstall(&table, target),
                selectors::can_uninstall(&table, target)
            );
        }

        #[test]
        fn progress_only_while_downloading(actions in prop::collection::vec(any_action(), 0..60)) {
            let mut table = Installations::new();
            for action in &actions {
                let _ = table.apply(action);
            }
            for record in table.iter() {
                if record.status != InstallStatus::Downloading {
                    prop_assert_eq!(record.download_progress, Percent::ZERO);
                }
                if record.status != InstallStatus::Error {
                    prop_assert_eq!(&record.error, &None);
                }
            }
        }
    }
}
