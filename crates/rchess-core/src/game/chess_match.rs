//! 対局本体

use log::debug;

use super::arena::{PieceArena, PieceId, PieceRecord};
use super::options::MatchOptions;
use super::state::{MatchState, Phase};
use crate::board::Board;
use crate::error::{BoardError, ChessError, InvalidStateReason, Result};
use crate::movegen;
use crate::types::{BOARD_SIZE, Bitboard, ChessSquare, Color, Piece, PieceType, Square};

/// 初期配置の駒の並び（a〜h ファイル）
const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// チェスの対局
///
/// 単一所有者からの逐次アクセスを前提とする。複数の呼び出し元で共有する場合は
/// 対局ごとにロックなどで直列化すること。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessMatch {
    pub(crate) board: Board,
    pub(crate) arena: PieceArena,
    /// 盤上の駒（王手・詰み判定での走査用）
    pub(crate) on_board: Vec<PieceId>,
    /// 取られた駒（取られた順）
    pub(crate) captured: Vec<PieceId>,
    pub(crate) state: MatchState,
    pub(crate) options: MatchOptions,
}

impl ChessMatch {
    /// 標準の初期配置で対局を開始する（白番、1手目）
    pub fn new() -> Self {
        Self::with_options(MatchOptions::default()).expect("default options are always valid")
    }

    /// オプション付きで標準の初期配置から開始する
    pub fn with_options(options: MatchOptions) -> Result<Self> {
        let mut game = Self::empty(options)?;
        game.initial_setup()?;
        Ok(game)
    }

    /// 駒のない 8x8 盤で対局を作る（局面設定用）
    pub fn empty(options: MatchOptions) -> Result<Self> {
        options.validate()?;
        Ok(ChessMatch {
            board: Board::new(BOARD_SIZE as usize, BOARD_SIZE as usize)?,
            arena: PieceArena::default(),
            on_board: Vec::with_capacity(32),
            captured: Vec::new(),
            state: MatchState::initial(),
            options,
        })
    }

    fn initial_setup(&mut self) -> Result<()> {
        for color in [Color::White, Color::Black] {
            for (col, &piece_type) in BACK_RANK.iter().enumerate() {
                let sq = Square::new(color.back_row(), col as u8);
                self.place_new_piece(Piece::new(piece_type, color), sq)?;
            }
            for col in 0..BOARD_SIZE {
                let sq = Square::new(color.pawn_row(), col);
                self.place_new_piece(Piece::new(PieceType::Pawn, color), sq)?;
            }
        }
        Ok(())
    }

    /// 新しい駒を盤上に置く（局面設定用）
    pub fn place(&mut self, square: ChessSquare, piece: Piece) -> Result<PieceId> {
        self.place_new_piece(piece, square.to_square())
    }

    /// 手番を設定する（局面設定用）
    pub fn set_current_player(&mut self, color: Color) {
        self.state.current_player = color;
    }

    fn place_new_piece(&mut self, piece: Piece, sq: Square) -> Result<PieceId> {
        if self.board.is_occupied(sq)? {
            return Err(BoardError::Occupied(sq).into());
        }
        let id = self.arena.spawn(piece, 0);
        self.put_piece(id, sq)?;
        self.on_board.push(id);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // 盤面グリッドと駒記録の同期
    // ------------------------------------------------------------------

    pub(crate) fn put_piece(&mut self, id: PieceId, sq: Square) -> Result<()> {
        self.board.put(id, sq)?;
        self.arena.get_mut(id).square = Some(sq);
        Ok(())
    }

    pub(crate) fn remove_piece(&mut self, sq: Square) -> Result<Option<PieceId>> {
        let removed = self.board.take(sq)?;
        if let Some(id) = removed {
            self.arena.get_mut(id).square = None;
        }
        Ok(removed)
    }

    #[inline]
    pub(crate) fn record(&self, id: PieceId) -> &PieceRecord {
        self.arena.get(id)
    }

    /// マス上の駒の記録（空・盤外は None）
    #[inline]
    pub(crate) fn record_at(&self, sq: Square) -> Option<&PieceRecord> {
        self.board.get(sq).map(|id| self.arena.get(id))
    }

    // ------------------------------------------------------------------
    // 読み取り
    // ------------------------------------------------------------------

    #[inline]
    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.state.current_player
    }

    /// 直前の手で相手に王手をかけたか
    #[inline]
    pub fn check(&self) -> bool {
        self.state.check
    }

    #[inline]
    pub fn checkmate(&self) -> bool {
        self.state.checkmate
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[inline]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[inline]
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, square: ChessSquare) -> Option<Piece> {
        self.record_at(square.to_square()).map(|rec| rec.piece)
    }

    /// マス上の駒の手数カウンタ
    pub fn move_count_at(&self, square: ChessSquare) -> Option<u32> {
        self.record_at(square.to_square()).map(|rec| rec.move_count)
    }

    /// 盤面全体（row 0 = 8段目）
    pub fn pieces(&self) -> [[Option<Piece>; 8]; 8] {
        let mut mat = [[None; 8]; 8];
        for (sq, id) in self.board.occupied() {
            mat[sq.row() as usize][sq.col() as usize] = Some(self.arena.get(id).piece);
        }
        mat
    }

    /// 盤上の駒数
    pub fn pieces_on_board(&self) -> usize {
        self.on_board.len()
    }

    pub fn captured_pieces(&self) -> Vec<Piece> {
        self.captured.iter().map(|&id| self.arena.get(id).piece).collect()
    }

    /// アンパッサンで取られうるポーンの位置
    pub fn en_passant_vulnerable(&self) -> Option<ChessSquare> {
        self.state.en_passant.and_then(|id| self.notation_of(id))
    }

    /// 成り先の指定を待っているポーンの位置
    pub fn promotion_pending(&self) -> Option<ChessSquare> {
        self.state.promotion.and_then(|id| self.notation_of(id))
    }

    pub(crate) fn notation_of(&self, id: PieceId) -> Option<ChessSquare> {
        self.arena.get(id).square.and_then(|sq| ChessSquare::from_square(sq).ok())
    }

    // ------------------------------------------------------------------
    // 指し手
    // ------------------------------------------------------------------

    /// 移動元の駒の擬似合法な移動先
    pub fn possible_moves(&self, source: ChessSquare) -> Result<Bitboard> {
        let id = self.validate_source(source.to_square())?;
        Ok(movegen::pseudo_legal_targets(self, id))
    }

    /// 移動元の駒の合法な移動先（自玉が王手になる手を除く）
    pub fn legal_targets(&mut self, source: ChessSquare) -> Result<Bitboard> {
        let from = source.to_square();
        let id = self.validate_source(from)?;
        let mover = self.record(id).piece.color;
        let mut legal = Bitboard::EMPTY;
        for to in movegen::pseudo_legal_targets(self, id) {
            if !self.leaves_in_check(from, to, mover)? {
                legal.set(to);
            }
        }
        Ok(legal)
    }

    /// 指し手を実行し、取った駒を返す
    ///
    /// 検証エラーは盤面を変更する前に返す。自玉が王手になる手は一度実行してから
    /// 完全に巻き戻し、`SelfCheck` を返す。いずれの失敗でも状態は変わらない。
    pub fn perform_move(
        &mut self,
        source: ChessSquare,
        target: ChessSquare,
    ) -> Result<Option<Piece>> {
        if self.state.checkmate {
            return Err(InvalidStateReason::GameOver.into());
        }
        if self.state.promotion.is_some() {
            return Err(InvalidStateReason::PromotionPending.into());
        }

        let from = source.to_square();
        let to = target.to_square();
        let id = self.validate_source(from)?;
        self.validate_target(id, to)?;

        let mover = self.state.current_player;
        let undo = self.do_move(from, to)?;
        match self.is_in_check(mover) {
            Ok(false) => {}
            Ok(true) => {
                self.undo_move(undo)?;
                debug!("rejected {source}{target}: {mover} king would be in check");
                return Err(ChessError::SelfCheck);
            }
            Err(e) => {
                self.undo_move(undo)?;
                return Err(e);
            }
        }

        let captured = undo.captured.map(|c| self.record(c.id).piece);
        let moved = self.record(id).piece;
        debug!(
            "turn {}: {mover} {} {source}{target}{}",
            self.state.turn,
            moved.piece_type,
            captured.map(|p| format!(" x {}", p.piece_type)).unwrap_or_default()
        );

        if moved.piece_type == PieceType::Pawn && to.row() == mover.promotion_row() {
            // 成り待ちの間も直前の2マス前進は無効
            self.state.en_passant = None;
            self.state.promotion = Some(id);
            if let Some(kind) = self.options.auto_promote {
                self.resolve_promotion(kind)?;
            }
        } else {
            let double_step = (moved.piece_type == PieceType::Pawn
                && from.row().abs_diff(to.row()) == 2)
                .then_some(id);
            self.finish_turn(mover, double_step)?;
        }

        Ok(captured)
    }

    /// 成り待ちのポーンを指定の駒種に置き換える
    ///
    /// 元のポーンは盤上リストから外れる（取られた駒には入らない）。
    /// 新しい駒はポーンの手数カウンタを引き継ぐ。
    pub fn resolve_promotion(&mut self, kind: PieceType) -> Result<Piece> {
        let Some(pawn) = self.state.promotion else {
            return Err(InvalidStateReason::NoPromotionPending.into());
        };
        if !kind.is_promotion_target() {
            return Err(InvalidStateReason::InvalidPromotionKind(kind).into());
        }

        let PieceRecord {
            piece,
            square,
            move_count,
        } = self.record(pawn).clone();
        let sq = square.ok_or(InvalidStateReason::NoPromotionPending)?;

        self.remove_piece(sq)?;
        self.on_board.retain(|&id| id != pawn);

        let promoted = Piece::new(kind, piece.color);
        let id = self.arena.spawn(promoted, move_count);
        self.put_piece(id, sq)?;
        self.on_board.push(id);
        debug!("{} pawn promoted to {kind}", piece.color);

        self.finish_turn(piece.color, None)?;
        Ok(promoted)
    }

    /// 半手を締めくくる: アンパッサン対象の更新、相手の王手・詰み判定、手番進行
    fn finish_turn(&mut self, mover: Color, double_step: Option<PieceId>) -> Result<()> {
        // 相手の応手（アンパッサンによる王手回避を含む）を正しく探索するため先に更新する
        self.state.en_passant = double_step;

        let opponent = mover.opponent();
        let check = self.is_in_check(opponent)?;
        let checkmate = check && self.is_checkmate(opponent)?;
        if checkmate {
            debug!("checkmate: {mover} wins on turn {}", self.state.turn);
        } else if check {
            debug!("{opponent} is in check");
        }
        self.state.advance(check, checkmate);
        Ok(())
    }
}

impl Default for ChessMatch {
    fn default() -> Self {
        Self::new()
    }
}
