use safepath::domain::QueryStage;

#[test]
fn given_received_when_following_next_then_reaches_completed_in_order() {
    let mut stage = QueryStage::Received;
    let mut visited = vec![stage];
    while let Some(next) = stage.next() {
        visited.push(next);
        stage = next;
    }

    assert_eq!(
        visited,
        vec![
            QueryStage::Received,
            QueryStage::Transcribing,
            QueryStage::EntityExtracting,
            QueryStage::DataLookup,
            QueryStage::PromptComposing,
            QueryStage::Generating,
            QueryStage::ReplyParsing,
            QueryStage::Synthesizing,
            QueryStage::Completed,
        ]
    );
}

#[test]
fn given_terminal_stages_when_checked_then_reported_terminal() {
    assert!(QueryStage::Completed.is_terminal());
    assert!(QueryStage::Failed.is_terminal());
    assert!(!QueryStage::Generating.is_terminal());
    assert_eq!(QueryStage::Failed.next(), None);
}

#[test]
fn given_stage_when_displayed_then_uses_snake_case_name() {
    assert_eq!(QueryStage::EntityExtracting.to_string(), "entity_extracting");
}
