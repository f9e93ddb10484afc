//! Dashboard HTML template
//!
//! Contains the main page structure including:
//! - Header with navigation and search
//! - Panel heading and coin grid containers
//! - Replacement dialog
//! - Toast area for notifications

pub const TEMPLATE: &str = r##"
    <div class="page">
        <header>
            <div class="brand">
                <h1>🪙 Crypto Coins</h1>
                <span class="followed" id="followedCount">0/5 followed</span>
            </div>
            <nav>
                <a href="#" class="nav-link active" data-panel="currencies">Currencies</a>
                <a href="#" class="nav-link" data-panel="reports">Reports</a>
                <a href="#" class="nav-link" data-panel="about">About</a>
            </nav>
            <input type="search" id="search" placeholder="Search by name or symbol" autocomplete="off">
        </header>

        <main>
            <div id="mainContent"><h1>Currencies</h1></div>
            <div class="grid" id="container">
                <div class="loading">Loading...</div>
            </div>
        </main>
    </div>

    <!-- Replacement dialog -->
    <div class="modal-backdrop" id="replacementModal" hidden>
        <div class="modal">
            <div class="modal-header">
                <span class="modal-title">Followed coins limit reached</span>
                <button class="btn-close" id="closeWindowButton" aria-label="Close">✕</button>
            </div>
            <div class="modal-body" id="replacementModalBody"></div>
            <div class="modal-footer">
                <button class="btn btn-secondary" id="cancelButton">Cancel</button>
                <button class="btn btn-primary" id="replaceButton">Replace</button>
            </div>
        </div>
    </div>

    <!-- Notifications -->
    <div class="toasts" id="toasts"></div>
"##;
