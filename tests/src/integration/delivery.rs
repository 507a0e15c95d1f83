//! Causal buffering: any arrival order converges to the same view.

use super::support::{chain, finality_config, genesis, validator, CollectingGateway};
use ffg_01_finality::{DeliveryOutcome, VoteRejection};
use shared_types::{Message, MessageId, ValidatorId, Vote};
use std::sync::Arc;

const VOTES: u128 = 1 << 64;

#[test]
fn test_reverse_order_chain_is_fully_replayed() {
    let root = genesis(4);
    let blocks = chain(&root, 100, 20);
    let mut v = validator(9, &root, finality_config(4));
    let mut gw = CollectingGateway::with_total(400);

    for block in blocks.iter().rev().take(19) {
        let outcome = v.deliver(Message::Block(Arc::clone(block)), &mut gw);
        assert!(matches!(outcome, DeliveryOutcome::Pending { .. }));
    }
    assert_eq!(v.buffered_count(), 19);
    assert_eq!(v.head().id, root.id);

    assert_eq!(v.deliver(Message::Block(Arc::clone(&blocks[0])), &mut gw), DeliveryOutcome::Accepted);
    assert_eq!(v.buffered_count(), 0);
    assert_eq!(v.head().id, blocks[19].id);
    assert_eq!(v.received_blocks().count(), 21);
}

#[test]
fn test_deep_backlog_does_not_exhaust_the_stack() {
    let root = genesis(4);
    let blocks = chain(&root, 100, 50_000);
    let mut v = validator(9, &root, finality_config(4));
    let mut gw = CollectingGateway::with_total(400);

    for block in blocks.iter().skip(1).rev() {
        v.deliver(Message::Block(Arc::clone(block)), &mut gw);
    }
    v.deliver(Message::Block(Arc::clone(&blocks[0])), &mut gw);

    assert_eq!(v.head().height, 50_000);
    assert_eq!(v.buffered_count(), 0);
}

#[test]
fn test_votes_before_blocks_justify_once_blocks_arrive() {
    let root = genesis(4);
    let blocks = chain(&root, 100, 5);
    let checkpoint = &blocks[4];
    let votes: Vec<Vote> = (0..3u32)
        .map(|i| {
            Vote::new(
                MessageId::from_u128(VOTES + u128::from(i)),
                &root,
                checkpoint,
                ValidatorId(i),
                100,
            )
        })
        .collect();

    let mut early = validator(9, &root, finality_config(4));
    let mut early_gw = CollectingGateway::with_total(400);
    for vote in &votes {
        let outcome = early.deliver(Message::Vote(vote.clone()), &mut early_gw);
        assert_eq!(outcome, DeliveryOutcome::Pending { missing: checkpoint.id });
    }
    for block in blocks.iter().rev() {
        early.deliver(Message::Block(Arc::clone(block)), &mut early_gw);
    }

    let mut in_order = validator(9, &root, finality_config(4));
    let mut in_order_gw = CollectingGateway::with_total(400);
    for block in &blocks {
        in_order.deliver(Message::Block(Arc::clone(block)), &mut in_order_gw);
    }
    for vote in &votes {
        assert_eq!(in_order.deliver(Message::Vote(vote.clone()), &mut in_order_gw), DeliveryOutcome::Accepted);
    }

    for v in [&early, &in_order] {
        assert!(v.is_justified(&checkpoint.id));
        assert!(v.is_finalized(&root.id));
        assert_eq!(v.highest_justified_checkpoint().id, checkpoint.id);
        assert_eq!(v.head().id, checkpoint.id);
        assert_eq!(v.buffered_count(), 0);
    }
    assert_eq!(early.justified(), in_order.justified());
    assert_eq!(early_gw.rewards, in_order_gw.rewards);
}

#[test]
fn test_duplicate_vote_is_suppressed_by_default() {
    let root = genesis(4);
    let blocks = chain(&root, 100, 5);
    let vote = Vote::new(MessageId::from_u128(VOTES), &root, &blocks[4], ValidatorId(1), 100);

    let mut v = validator(9, &root, finality_config(4));
    let mut gw = CollectingGateway::with_total(400);
    for block in &blocks {
        v.deliver(Message::Block(Arc::clone(block)), &mut gw);
    }

    assert_eq!(v.deliver(Message::Vote(vote.clone()), &mut gw), DeliveryOutcome::Accepted);
    assert_eq!(v.deliver(Message::Vote(vote), &mut gw), DeliveryOutcome::Duplicate);
    assert!(gw.slashes.is_empty());
    assert_eq!(v.link_weight(&root.id, &blocks[4].id), 100);
}

#[test]
fn test_redelivered_vote_is_slashable_without_suppression() {
    let root = genesis(4);
    let blocks = chain(&root, 100, 5);
    let vote = Vote::new(MessageId::from_u128(VOTES), &root, &blocks[4], ValidatorId(1), 100);

    let mut v = validator(
        9,
        &root,
        ffg_01_finality::FinalityConfig {
            suppress_duplicates: false,
            ..finality_config(4)
        },
    );
    let mut gw = CollectingGateway::with_total(400);
    for block in &blocks {
        v.deliver(Message::Block(Arc::clone(block)), &mut gw);
    }

    assert_eq!(v.deliver(Message::Vote(vote.clone()), &mut gw), DeliveryOutcome::Accepted);
    let second = v.deliver(Message::Vote(vote), &mut gw);

    assert!(matches!(second, DeliveryOutcome::Rejected(VoteRejection::Slashable(_))));
    assert_eq!(gw.slashes.len(), 1);
    assert_eq!(gw.slashes[0].validator(), ValidatorId(1));
    assert_eq!(v.link_weight(&root.id, &blocks[4].id), 100);
}
