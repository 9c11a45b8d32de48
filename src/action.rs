use serde::{Deserialize, Serialize};
use strum::Display;

use crate::{api::FetchResponse, movie::Movie};

#[derive(Debug, Clone, PartialEq, Display, Serialize, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,
    Error(String),

    RowNext,
    RowPrev,
    RowFirst,
    RowLast,
    RowScrollDown,
    RowScrollUp,
    ToggleSelection,
    ToggleMovie(Movie),

    NextPage,
    PrevPage,
    CycleEntries,
    SetEntries(usize),

    FocusSearch,
    CancelSearch,
    SubmitSearch(String),
    ClearSearch,

    OpenAddForm,
    CloseAddForm,
    SubmitAdd(Movie),
    OpenEditForm,
    CloseEditForm,
    SubmitEdit(Movie),
    OpenDeleteDialog,
    CloseDeleteDialog,
    ConfirmDelete,
    DismissAlert,

    ViewDetail,
    ShowDetail(Movie),
    CloseDetail,
    DetailScrollUp,
    DetailScrollDown,

    Fetched(FetchResponse),
}
