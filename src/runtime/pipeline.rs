use bytes::Bytes;
use tracing::{debug, info};

use super::request::Request;
use crate::api::Lookup;
use crate::domain::{
    decode_ability, decode_move, decode_stat, render, Details, Entity, Mode, Pokemon, Resource,
};
use crate::utils::PokedexError;

/// Front sprite of a looked-up Pokemon
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Pokemon name as reported by the API
    pub name: String,
    pub bytes: Bytes,
}

/// Emitted once per query, in query order
#[derive(Debug)]
pub struct QueryEvent {
    pub identifier: String,
    /// Rendered text, or why the query produced nothing
    pub outcome: Result<String, PokedexError>,
    /// Only present when sprites were requested and could be fetched
    pub sprite: Option<Sprite>,
}

/// Drives lookup, decoding and rendering for every query of a request.
/// Queries run one after another; a failing query never stops the batch.
pub struct QueryPipeline {
    lookup: Box<dyn Lookup>,
}

impl QueryPipeline {
    pub fn new(lookup: Box<dyn Lookup>) -> Self {
        Self { lookup }
    }

    /// Resolve the request's input, then run every query.
    /// Resolution errors are returned before any lookup happens.
    pub async fn run_request<F>(&self, request: &mut Request, on_event: F) -> Result<(), PokedexError>
    where
        F: FnMut(&QueryEvent),
    {
        info!("{}", request);
        request.resolve()?;
        self.run(request, on_event).await;
        Ok(())
    }

    /// Run every resolved query, appending one block per query to `results`
    pub async fn run<F>(&self, request: &mut Request, mut on_event: F)
    where
        F: FnMut(&QueryEvent),
    {
        let mode = request.mode();
        let queries = request.queries.clone();
        let total = queries.len();

        for (index, identifier) in queries.into_iter().enumerate() {
            debug!("[{}/{}] {} '{}'", index + 1, total, mode, identifier);

            let event = self
                .process(mode, identifier, request.expanded, request.fetch_sprites)
                .await;

            match &event.outcome {
                Ok(text) => request.push_result(text),
                Err(e) => {
                    debug!("{} '{}': {}", mode, event.identifier, e);
                    request.push_result(&mode.not_found_message(&event.identifier));
                }
            }

            on_event(&event);
        }
    }

    async fn process(
        &self,
        mode: Mode,
        identifier: String,
        expanded: bool,
        fetch_sprites: bool,
    ) -> QueryEvent {
        let entity = match self.lookup_entity(mode, &identifier).await {
            Ok(entity) => entity,
            Err(e) => {
                return QueryEvent {
                    identifier,
                    outcome: Err(e),
                    sprite: None,
                }
            }
        };

        let mut details = Details::default();
        let mut sprite = None;

        if let Entity::Pokemon(pokemon) = &entity {
            if expanded {
                details = self.fetch_details(pokemon).await;
            }
            if fetch_sprites {
                sprite = self.fetch_sprite(pokemon).await;
            }
        }

        QueryEvent {
            identifier,
            outcome: Ok(render(&entity, expanded, &details)),
            sprite,
        }
    }

    async fn lookup_entity(&self, mode: Mode, identifier: &str) -> Result<Entity, PokedexError> {
        // Blank batch lines never reach the API
        if identifier.is_empty() {
            return Err(PokedexError::NotFound(String::new()));
        }

        let payload = self.lookup.fetch(mode.resource(), identifier).await?;
        mode.decode(identifier, payload)
    }

    /// Look up the detail record of every ability, move and stat by name.
    /// Records that cannot be fetched are left out.
    async fn fetch_details(&self, pokemon: &Pokemon) -> Details {
        let mut details = Details::default();

        for name in &pokemon.abilities {
            if details.abilities.contains_key(name) {
                continue;
            }
            match self.fetch_detail(Resource::Ability, name, decode_ability).await {
                Ok(ability) => {
                    details.abilities.insert(name.clone(), ability);
                }
                Err(e) => debug!("ability '{}': {}", name, e),
            }
        }

        for mv in &pokemon.moves {
            if details.moves.contains_key(&mv.name) {
                continue;
            }
            match self.fetch_detail(Resource::Move, &mv.name, decode_move).await {
                Ok(record) => {
                    details.moves.insert(mv.name.clone(), record);
                }
                Err(e) => debug!("move '{}': {}", mv.name, e),
            }
        }

        for stat in &pokemon.stats {
            if details.stats.contains_key(&stat.name) {
                continue;
            }
            match self.fetch_detail(Resource::Stat, &stat.name, decode_stat).await {
                Ok(record) => {
                    details.stats.insert(stat.name.clone(), record);
                }
                Err(e) => debug!("stat '{}': {}", stat.name, e),
            }
        }

        details
    }

    async fn fetch_detail<T>(
        &self,
        resource: Resource,
        name: &str,
        decode: fn(&str, serde_json::Value) -> Result<T, PokedexError>,
    ) -> Result<T, PokedexError> {
        let payload = self.lookup.fetch(resource, name).await?;
        decode(name, payload)
    }

    async fn fetch_sprite(&self, pokemon: &Pokemon) -> Option<Sprite> {
        let url = pokemon.sprite_url.as_deref()?;

        match self.lookup.fetch_bytes(url).await {
            Ok(bytes) => Some(Sprite {
                name: pokemon.name.clone(),
                bytes,
            }),
            Err(e) => {
                debug!("sprite for '{}': {}", pokemon.name, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockLookup;
    use crate::domain::fixtures;
    use crate::runtime::emit_to;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    /// A stand-in API that knows Pikachu and its related records
    fn fake_api(mock: &mut MockLookup) {
        mock.expect_fetch()
            .returning(|resource, identifier| match (resource, identifier) {
                (Resource::Pokemon, "pikachu") => Ok(fixtures::pikachu()),
                (Resource::Pokemon, "broken") => Ok(json!({"name": "broken"})),
                (Resource::Ability, "static") => Ok(fixtures::static_ability()),
                (Resource::Move, "thunder-shock") => Ok(fixtures::thunder_shock()),
                (Resource::Stat, "hp") => Ok(fixtures::stat("hp", 1)),
                (Resource::Stat, "speed") => Ok(fixtures::stat("speed", 6)),
                (_, other) => Err(PokedexError::NotFound(other.to_string())),
            });
    }

    async fn run(mock: MockLookup, request: &mut Request) -> Vec<QueryEvent> {
        let pipeline = QueryPipeline::new(Box::new(mock));
        let mut events = Vec::new();
        pipeline
            .run_request(request, |event| {
                events.push(QueryEvent {
                    identifier: event.identifier.clone(),
                    outcome: event
                        .outcome
                        .as_ref()
                        .cloned()
                        .map_err(|e| PokedexError::NotFound(e.to_string())),
                    sprite: event.sprite.clone(),
                })
            })
            .await
            .unwrap();
        events
    }

    #[tokio::test]
    async fn test_single_pokemon_summary() {
        let mut mock = MockLookup::new();
        fake_api(&mut mock);
        let mut request = Request::new(Mode::Pokemon, "pikachu", false, "print");

        let events = run(mock, &mut request).await;

        assert_eq!(events.len(), 1);
        assert!(events[0].outcome.is_ok());
        assert!(request.results.contains("Name: Pikachu"));
        assert!(request.results.contains("Height: 0.4 m"));
        assert!(request.results.contains("Weight: 6 kg"));
        assert!(request.results.contains("Abilities:\n\t1) Static"));
    }

    #[tokio::test]
    async fn test_summary_does_not_fetch_details() {
        let mut mock = MockLookup::new();
        mock.expect_fetch()
            .times(1)
            .returning(|_, _| Ok(fixtures::pikachu()));
        let mut request = Request::new(Mode::Pokemon, "pikachu", false, "print");

        run(mock, &mut request).await;
    }

    #[tokio::test]
    async fn test_not_found_message() {
        let mut mock = MockLookup::new();
        fake_api(&mut mock);
        let mut request = Request::new(Mode::Pokemon, "doesnotexist", false, "print");

        let events = run(mock, &mut request).await;

        assert!(events[0].outcome.is_err());
        assert_eq!(
            request.results,
            "Pokemon with name/id 'doesnotexist' could not be found.\n"
        );
    }

    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_query_to_file_leaves_console_empty() {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mut mock = MockLookup::new();
        mock.expect_fetch().returning(|_, _| {
            Err(PokedexError::Network(
                "http://127.0.0.1:9/pokemon/doesnotexist: error sending request".into(),
            ))
        });
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.txt");
        let mut request =
            Request::new(Mode::Pokemon, "doesnotexist", false, &path.to_string_lossy());

        run(mock, &mut request).await;
        let mut console = Vec::new();
        emit_to(&request.output, &request.results, &mut console).unwrap();

        assert!(console.is_empty());
        assert!(log.0.lock().unwrap().is_empty());
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Pokemon with name/id 'doesnotexist' could not be found.\n"
        );
    }

    #[tokio::test]
    async fn test_unexpected_payload_degrades_to_not_found() {
        let mut mock = MockLookup::new();
        fake_api(&mut mock);
        let mut request = Request::new(Mode::Pokemon, "broken", false, "print");

        run(mock, &mut request).await;

        assert_eq!(
            request.results,
            "Pokemon with name/id 'broken' could not be found.\n"
        );
    }

    #[tokio::test]
    async fn test_batch_keeps_order_and_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("team.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "Pikachu\nmissingno\n\npikachu\n").unwrap();

        let mut mock = MockLookup::new();
        // the blank line is answered without a lookup
        mock.expect_fetch()
            .times(3)
            .returning(|_, identifier| match identifier {
                "pikachu" => Ok(fixtures::pikachu()),
                other => Err(PokedexError::NotFound(other.to_string())),
            });
        let mut request = Request::new(Mode::Pokemon, path.to_string_lossy(), false, "print");

        let events = run(mock, &mut request).await;

        let identifiers: Vec<&str> = events.iter().map(|e| e.identifier.as_str()).collect();
        assert_eq!(identifiers, vec!["pikachu", "missingno", "", "pikachu"]);

        let blocks: Vec<&str> = request.results.trim_end().split("\n\n").collect();
        assert_eq!(blocks.len(), 4);
        assert!(blocks[0].starts_with("Name: Pikachu"));
        assert_eq!(blocks[1], "Pokemon with name/id 'missingno' could not be found.");
        assert_eq!(blocks[2], "Pokemon with name/id '' could not be found.");
        assert!(blocks[3].starts_with("Name: Pikachu"));
    }

    #[tokio::test]
    async fn test_empty_batch_file_makes_no_lookups() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.txt");
        std::fs::File::create(&path).unwrap();

        let mut mock = MockLookup::new();
        mock.expect_fetch().never();
        let pipeline = QueryPipeline::new(Box::new(mock));
        let mut request = Request::new(Mode::Pokemon, path.to_string_lossy(), false, "print");

        let mut calls = 0;
        let result = pipeline.run_request(&mut request, |_| calls += 1).await;

        assert!(matches!(result, Err(PokedexError::EmptyFile(_))));
        assert_eq!(calls, 0);
        assert!(request.results.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_extension_makes_no_lookups() {
        let mut mock = MockLookup::new();
        mock.expect_fetch().never();
        let pipeline = QueryPipeline::new(Box::new(mock));
        let mut request = Request::new(Mode::Pokemon, "pokemon.csv", false, "print");

        let result = pipeline.run_request(&mut request, |_| {}).await;
        assert!(matches!(result, Err(PokedexError::InvalidFile(_))));
    }

    #[tokio::test]
    async fn test_expanded_fetches_details_by_name() {
        let mut mock = MockLookup::new();
        // pokemon + 2 abilities + 1 move + 2 stats
        mock.expect_fetch().times(6).returning(|resource, identifier| {
            match (resource, identifier) {
                (Resource::Pokemon, "pikachu") => Ok(fixtures::pikachu()),
                (Resource::Ability, "static") => Ok(fixtures::static_ability()),
                (Resource::Move, "thunder-shock") => Ok(fixtures::thunder_shock()),
                (Resource::Stat, "hp") => Ok(fixtures::stat("hp", 1)),
                (Resource::Stat, "speed") => Ok(fixtures::stat("speed", 6)),
                (_, other) => Err(PokedexError::NotFound(other.to_string())),
            }
        });
        let mut request = Request::new(Mode::Pokemon, "pikachu", true, "print");

        let events = run(mock, &mut request).await;

        assert!(events[0].outcome.is_ok());
        assert!(request.results.contains("\t1) Static\n\t\tId: 9\n"));
        assert!(request
            .results
            .contains("\t2) Lightning-Rod\n\t\tNo details found for 'lightning-rod'."));
        assert!(request.results.contains("\t2) Speed, Base Stat: 90\n\t\tId: 6\n"));
        assert!(request
            .results
            .contains("\t\tEffect (Short): Has a 10% chance to paralyze the target."));
    }

    #[tokio::test]
    async fn test_expanded_ignored_for_ability_queries() {
        let mut mock = MockLookup::new();
        mock.expect_fetch()
            .times(1)
            .returning(|_, _| Ok(fixtures::static_ability()));
        let mut request = Request::new(Mode::Ability, "static", true, "print");

        run(mock, &mut request).await;

        assert!(request.results.starts_with("Ability Name: Static\n"));
    }

    #[tokio::test]
    async fn test_move_query() {
        let mut mock = MockLookup::new();
        fake_api(&mut mock);
        let mut request = Request::new(Mode::Move, "thunder-shock", false, "print");

        run(mock, &mut request).await;

        assert!(request.results.starts_with("Move Name: Thunder-Shock\n"));
        assert!(request.results.contains("Type: electric"));
    }

    #[tokio::test]
    async fn test_sprite_attached_when_requested() {
        let mut mock = MockLookup::new();
        fake_api(&mut mock);
        mock.expect_fetch_bytes()
            .times(1)
            .returning(|_| Ok(Bytes::from_static(b"\x89PNG")));
        let mut request = Request::new(Mode::Pokemon, "pikachu", false, "print").with_sprites(true);

        let events = run(mock, &mut request).await;

        let sprite = events[0].sprite.as_ref().expect("sprite should be attached");
        assert_eq!(sprite.name, "pikachu");
        assert_eq!(sprite.bytes.as_ref(), b"\x89PNG");
    }

    #[tokio::test]
    async fn test_sprite_failure_keeps_result() {
        let mut mock = MockLookup::new();
        fake_api(&mut mock);
        mock.expect_fetch_bytes()
            .returning(|url| Err(PokedexError::NotFound(url.to_string())));
        let mut request = Request::new(Mode::Pokemon, "pikachu", false, "print").with_sprites(true);

        let events = run(mock, &mut request).await;

        assert!(events[0].outcome.is_ok());
        assert!(events[0].sprite.is_none());
    }
}
