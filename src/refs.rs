use crate::Error;
use pdf_writer::Ref;
use std::collections::HashMap;

/// Every kind of indirect object the document writer emits, keyed by the index
/// of the page or font it belongs to
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Font(usize),
    CidFont(usize),
    ToUnicode(usize),
    FontDescriptor(usize),
    FontData(usize),
}

/// Hands out PDF object ids and remembers which object each one was given to
pub struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next_id: i32,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next_id: 1,
        }
    }

    /// Allocate a fresh id for `ref_type`
    pub fn gen(&mut self, ref_type: RefType) -> Ref {
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        self.refs.insert(ref_type, id);
        id
    }

    /// The id previously allocated for `ref_type`
    pub fn get(&self, ref_type: RefType) -> Result<Ref, Error> {
        self.refs
            .get(&ref_type)
            .copied()
            .ok_or(Error::MissingReference(ref_type))
    }
}
