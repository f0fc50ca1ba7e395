//! Contract tests for the reactive subscription surface

use std::time::Duration;

use canopy::prelude::*;
use canopy_client_adapter_memory::MemorySettingsClient;
use futures::StreamExt;

fn tree_with_level(level: &str) -> SettingsNode {
	SettingsNode::object(
		"root",
		vec![SettingsNode::object("logging", vec![SettingsNode::leaf("level", level)])],
	)
}

async fn next_item(stream: &mut SettingsStream) -> Option<CnResult<VersionedSettings>> {
	tokio::time::timeout(Duration::from_secs(5), stream.next())
		.await
		.expect("stream should produce an item before the timeout")
}

#[tokio::test]
async fn test_cached_value_is_delivered_immediately() {
	let client = MemorySettingsClient::new();
	client.publish(tree_with_level("info"));

	let mut stream = client.subscribe(&SettingsPath::from("logging")).await.expect("subscribe");
	let item = next_item(&mut stream).await.expect("item").expect("first item should be Ok");

	assert_eq!(item.version, 1);
	let subtree = item.settings.expect("logging subtree should exist");
	assert_eq!(subtree.child("level").and_then(SettingsNode::value), Some("info"));
}

#[tokio::test]
async fn test_nothing_before_first_load() {
	let client = MemorySettingsClient::new();
	let mut stream = client.subscribe(&SettingsPath::root()).await.expect("subscribe");

	// No cached value: the stream stays silent until a publish
	let silent = tokio::time::timeout(Duration::from_millis(100), stream.next()).await;
	assert!(silent.is_err(), "stream should not produce anything before the first load");

	client.publish(tree_with_level("warn"));
	let item = next_item(&mut stream).await.expect("item").expect("item should be Ok");
	assert_eq!(item.version, 1);
}

#[tokio::test]
async fn test_one_item_per_change_in_version_order() {
	let client = MemorySettingsClient::new();
	client.publish(tree_with_level("debug"));

	let mut stream = client.subscribe(&SettingsPath::from("logging/level")).await.expect("subscribe");

	client.publish(tree_with_level("info"));
	client.publish(tree_with_level("warn"));

	let mut versions = Vec::new();
	let mut levels = Vec::new();
	for _ in 0..3 {
		let item = next_item(&mut stream).await.expect("item").expect("item should be Ok");
		versions.push(item.version);
		levels.push(
			item.settings
				.as_ref()
				.and_then(SettingsNode::value)
				.map(str::to_string),
		);
	}

	assert_eq!(versions, vec![1, 2, 3]);
	assert!(versions.windows(2).all(|w| w[0] < w[1]), "versions must not regress");
	assert_eq!(
		levels,
		vec![
			Some("debug".to_string()),
			Some("info".to_string()),
			Some("warn".to_string())
		]
	);
}

#[tokio::test]
async fn test_initial_failure_terminates_the_stream() {
	let client = MemorySettingsClient::new();
	let mut stream = client.subscribe(&SettingsPath::root()).await.expect("subscribe");

	client.fail_initial_load(Some("dns error"));

	let err = next_item(&mut stream).await.expect("item").expect_err("item should be Err");
	assert_eq!(err, Error::LoadFailed(Some("dns error".into())));

	// Terminal: no implicit resubscription
	let end = tokio::time::timeout(Duration::from_millis(100), stream.next()).await;
	assert_eq!(end.ok(), Some(None), "stream should be exhausted after the error");
}

#[tokio::test]
async fn test_subscribe_after_failure_errors_immediately() {
	let client = MemorySettingsClient::new();
	client.fail_initial_load(None);

	let mut stream = client.subscribe(&SettingsPath::root()).await.expect("subscribe");
	let err = next_item(&mut stream).await.expect("item").expect_err("item should be Err");
	assert_eq!(err, Error::LoadFailed(None));
	assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_new_subscription_after_recovery() {
	let client = MemorySettingsClient::new();
	client.fail_initial_load(None);

	// The failed subscription is gone for good; a fresh one sees the
	// recovered state
	client.publish(tree_with_level("info"));
	let mut stream = client.subscribe(&SettingsPath::root()).await.expect("subscribe");
	let item = next_item(&mut stream).await.expect("item").expect("item should be Ok");
	assert_eq!(item.version, 1);
}

#[tokio::test]
async fn test_updates_are_scoped_to_the_prefix() {
	let client = MemorySettingsClient::new();
	client.publish(tree_with_level("info"));

	let mut stream = client
		.subscribe(&SettingsPath::from("logging/missing"))
		.await
		.expect("subscribe");

	// The prefix does not exist: updates still arrive, with no subtree
	let item = next_item(&mut stream).await.expect("item").expect("item should be Ok");
	assert_eq!(item.settings, None);
	assert_eq!(item.version, 1);
}

// vim: ts=4
