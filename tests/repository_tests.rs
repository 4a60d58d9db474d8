//! Repository behavior against a real directory

use kaidan::{
    Choice, Condition, DialogueRepository, DialogueSet, FileSystemDialogueRepository, Gate,
    GateRule, Node, NodeId, RepositoryError, Tree,
};
use std::path::PathBuf;

fn keeper_set() -> DialogueSet {
    DialogueSet {
        npc: "Keeper".to_string(),
        trees: vec![
            Tree {
                name: "locked_out".to_string(),
                nodes: vec![Node {
                    id: NodeId(0),
                    text: "The cellar stays shut.".to_string(),
                    choices: vec![],
                    end: true,
                }],
            },
            Tree {
                name: "key_in_hand".to_string(),
                nodes: vec![Node {
                    id: NodeId(0),
                    text: "So you found it.".to_string(),
                    choices: vec![Choice::new("I did.", NodeId::END)],
                    end: false,
                }],
            },
        ],
        gate: Gate::new(
            vec![GateRule {
                when: Condition::HasItem("Cellar Key".to_string()),
                tree: 1,
            }],
            0,
        ),
    }
}

fn scratch_dir(label: &str) -> PathBuf {
    std::env::temp_dir().join(format!("kaidan-{label}-{}", std::process::id()))
}

#[tokio::test]
async fn save_load_and_list_round_trip_through_the_filesystem() {
    let dir = scratch_dir("roundtrip");
    let repository = FileSystemDialogueRepository::new(&dir);

    let set = keeper_set();
    repository.save(&set).await.unwrap();

    assert!(repository.exists("Keeper").await.unwrap());
    assert_eq!(repository.load("Keeper").await.unwrap(), set);
    assert_eq!(repository.list().await.unwrap(), vec!["Keeper".to_string()]);

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn loading_an_absent_set_reports_not_found() {
    let dir = scratch_dir("missing");
    tokio::fs::create_dir_all(&dir).await.unwrap();
    let repository = FileSystemDialogueRepository::new(&dir);

    assert!(matches!(
        repository.load("Nobody").await,
        Err(RepositoryError::NotFound { .. })
    ));
    assert!(!repository.exists("Nobody").await.unwrap());

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn corrupt_files_surface_as_invalid_data() {
    let dir = scratch_dir("corrupt");
    tokio::fs::create_dir_all(&dir).await.unwrap();
    tokio::fs::write(dir.join("Broken.json"), b"{ not json")
        .await
        .unwrap();
    let repository = FileSystemDialogueRepository::new(&dir);

    assert!(matches!(
        repository.load("Broken").await,
        Err(RepositoryError::InvalidFormat { .. })
    ));

    tokio::fs::remove_dir_all(&dir).await.unwrap();
}
