//! Хранилище узлов дерева поиска.
//!
//! Узлы лежат в одном векторе и ссылаются друг на друга по `NodeId`.
//! Вектор под `RwLock`, каждый узел под своим `Mutex`, поэтому воркеры
//! одновременно ходят по разным веткам. Порядок блокировок: сначала узел,
//! потом (при добавлении ребёнка) запись в вектор. Чтение вектора отпускается
//! до блокировки узла.

use std::sync::{Arc, Mutex, RwLock};

use crate::search::errors::SearchError;
use crate::search::node::{NodeId, SearchNode};

pub struct Arena {
    nodes: RwLock<Vec<Arc<Mutex<SearchNode>>>>,
}

impl Arena {
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self.nodes.read() {
            Ok(nodes) => nodes.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn push(&self, node: SearchNode) -> Result<NodeId, SearchError> {
        let mut nodes = self
            .nodes
            .write()
            .map_err(|_| SearchError::Internal("арена узлов отравлена"))?;
        let id = NodeId::try_from(nodes.len())
            .map_err(|_| SearchError::Internal("переполнение арены узлов"))?;
        nodes.push(Arc::new(Mutex::new(node)));
        Ok(id)
    }

    fn get(&self, id: NodeId) -> Result<Arc<Mutex<SearchNode>>, SearchError> {
        let nodes = self
            .nodes
            .read()
            .map_err(|_| SearchError::Internal("арена узлов отравлена"))?;
        nodes
            .get(id as usize)
            .cloned()
            .ok_or(SearchError::Internal("неизвестный NodeId"))
    }

    /// Выполнить `f` под блокировкой узла `id`.
    pub fn with_node<T>(
        &self,
        id: NodeId,
        f: impl FnOnce(&mut SearchNode) -> T,
    ) -> Result<T, SearchError> {
        let node = self.get(id)?;
        let mut guard = node
            .lock()
            .map_err(|_| SearchError::Internal("узел поиска отравлен"))?;
        Ok(f(&mut guard))
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}
