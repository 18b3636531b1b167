/*!
 * Integration tests for batch retrieval
 */

use ytcaptions::CaptionRetriever;
use ytcaptions::retrieval::collect_successes;
use crate::common::{self, mock_downloader::{MockDownloader, MockFailure}};

fn cue_document(text: &str) -> String {
    format!("WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n{}\n", text)
}

#[test]
fn test_getCaptionsBatch_withEmptyInput_shouldReturnEmptyMapping() {
    let dir = common::create_temp_dir().unwrap();
    let downloader = MockDownloader::new();
    let tracker = downloader.tracker();
    let retriever = CaptionRetriever::new(downloader, common::options_in(dir.path()));

    let ids: Vec<String> = Vec::new();
    assert!(retriever.get_captions_batch(&ids, None).is_empty());
    assert!(tracker.lock().unwrap().video_ids.is_empty());
}

#[test]
fn test_getCaptionsBatch_withMiddleFailure_shouldKeepOthers() {
    let dir = common::create_temp_dir().unwrap();
    let downloader = MockDownloader::new()
        .with_document("first", &cue_document("one"))
        .with_failure("second", MockFailure::Download)
        .with_document("third", &cue_document("three"));
    let tracker = downloader.tracker();
    let retriever = CaptionRetriever::new(downloader, common::options_in(dir.path()));

    let captions = retriever.get_captions_batch(&["first", "second", "third"], Some("en"));

    assert_eq!(captions.len(), 2);
    assert_eq!(captions.get("first").map(String::as_str), Some("one"));
    assert_eq!(captions.get("third").map(String::as_str), Some("three"));
    assert!(!captions.contains_key("second"));
    assert_eq!(tracker.lock().unwrap().video_ids, vec!["first", "second", "third"]);
}

#[test]
fn test_getCaptionsBatch_withEveryFailureKind_shouldReturnEmptyMapping() {
    let dir = common::create_temp_dir().unwrap();
    let downloader = MockDownloader::new()
        .with_failure("a", MockFailure::Download)
        .with_failure("b", MockFailure::Extractor)
        .with_failure("c", MockFailure::Other)
        .with_failure("d", MockFailure::Status(1))
        .with_document("e", "garbage");
    let retriever = CaptionRetriever::new(downloader, common::options_in(dir.path()));

    let captions = retriever.get_captions_batch(&["a", "b", "c", "d", "e", "f"], None);
    assert!(captions.is_empty());
    assert_eq!(common::file_count(dir.path()), 0);
}

#[test]
fn test_retrieveAll_shouldReportEachOutcomeInOrder() {
    let dir = common::create_temp_dir().unwrap();
    let downloader = MockDownloader::new()
        .with_failure("bad", MockFailure::Extractor)
        .with_document("good", &cue_document("fine"));
    let retriever = CaptionRetriever::new(downloader, common::options_in(dir.path()));

    let mut observed = Vec::new();
    let results = retriever.retrieve_all_with(&["bad", "good"], None, |id, result| {
        observed.push((id.to_string(), result.is_ok()));
    });

    assert_eq!(observed, vec![("bad".to_string(), false), ("good".to_string(), true)]);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, "bad");
    assert!(results[0].1.is_err());
    assert_eq!(results[1].1.as_deref().unwrap(), "fine");
}

#[test]
fn test_collectSuccesses_afterObservedBatch_shouldDropFailedIds() {
    common::init_test_logger();
    let dir = common::create_temp_dir().unwrap();
    let downloader = MockDownloader::new()
        .with_failure("bad", MockFailure::Download)
        .with_document("good", &cue_document("fine"));
    let retriever = CaptionRetriever::new(downloader, common::options_in(dir.path()));

    let mut progress = 0;
    let results = retriever.retrieve_all_with(&["bad", "good"], None, |_, _| progress += 1);
    let captions = collect_successes(results);

    assert_eq!(progress, 2);
    assert_eq!(captions.len(), 1);
    assert_eq!(captions.get("good").map(String::as_str), Some("fine"));
}
